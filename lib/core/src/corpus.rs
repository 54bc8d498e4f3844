use crate::error::{Error, Result};
use crate::ranker::{self, Ranked};
use crate::record::{CandidateId, CandidateRecord};
use crate::state::FittedState;
use crate::vector::FeatureVector;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub id: CandidateId,
    /// Position of the candidate in the corpus
    pub position: usize,
    pub score: f32,
}

/// Candidate vectors encoded against one fitted state
#[derive(Debug, Clone)]
pub struct EncodedCorpus {
    version: u64,
    dim: usize,
    ids: Vec<CandidateId>,
    vectors: Vec<FeatureVector>,
}

impl EncodedCorpus {
    /// Encode every record in parallel, preserving corpus order
    pub fn build(state: &FittedState, records: &[CandidateRecord]) -> Result<Self> {
        let vectors = records
            .par_iter()
            .map(|record| state.encode(record))
            .collect::<Result<Vec<_>>>()?;

        let zero = vectors.iter().filter(|v| v.is_zero()).count();
        if zero > 0 {
            warn!(
                version = state.version(),
                count = zero,
                "Candidates with an all-zero vector will score 0 against every query"
            );
        }

        Ok(Self {
            version: state.version(),
            dim: state.dim(),
            ids: records.iter().map(|r| r.id.clone()).collect(),
            vectors,
        })
    }

    /// Version of the fitted state these vectors belong to
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    pub fn get(&self, position: usize) -> Option<(&CandidateId, &FeatureVector)> {
        Some((self.ids.get(position)?, self.vectors.get(position)?))
    }

    /// Top `k` candidates by cosine similarity
    ///
    /// `shard_size` of 0 ranks sequentially; anything else shards the
    /// corpus across the rayon pool. Both give the same result.
    pub fn rank(&self, query: &FeatureVector, k: usize, shard_size: usize) -> Result<Vec<RankedCandidate>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }
        if query.is_zero() {
            debug!(version = self.version, "Query vector has zero magnitude; all scores are 0");
        }

        let ranked = if shard_size == 0 {
            ranker::rank(query, &self.vectors, k)
        } else {
            ranker::rank_sharded(query, &self.vectors, k, shard_size)
        };

        Ok(ranked
            .into_iter()
            .map(|Ranked { position, score }| RankedCandidate {
                id: self.ids[position].clone(),
                position,
                score,
            })
            .collect())
    }
}
