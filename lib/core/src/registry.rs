//! Versioned publication of fitted state
//!
//! A [`Snapshot`] bundles the corpus, its fitted state and its encoded
//! vectors. Readers clone an `Arc` to the current snapshot and keep using
//! it for the whole query; a re-fit builds the next snapshot completely
//! before swapping the pointer, so no reader ever sees a mix of versions.

use crate::corpus::EncodedCorpus;
use crate::error::{Error, Result};
use crate::record::CandidateRecord;
use crate::schema::FieldSchema;
use crate::state::FittedState;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Everything derived from one corpus version
#[derive(Debug)]
pub struct Snapshot {
    state: FittedState,
    corpus: EncodedCorpus,
    records: Vec<CandidateRecord>,
}

impl Snapshot {
    /// Fit, encode and bundle a corpus
    pub fn build(schema: &FieldSchema, records: Vec<CandidateRecord>) -> Result<Self> {
        let state = FittedState::fit(schema, &records)?;
        let corpus = state.encode_corpus(&records)?;
        Self::new(state, corpus, records)
    }

    /// Bundle parts produced elsewhere; the corpus must come from `state`
    pub fn new(state: FittedState, corpus: EncodedCorpus, records: Vec<CandidateRecord>) -> Result<Self> {
        if corpus.version() != state.version() {
            return Err(Error::VersionMismatch {
                expected: state.version(),
                actual: corpus.version(),
            });
        }
        if corpus.len() != records.len() {
            return Err(Error::InvalidConfig(format!(
                "encoded corpus has {} vectors for {} records",
                corpus.len(),
                records.len()
            )));
        }
        Ok(Self { state, corpus, records })
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    pub fn state(&self) -> &FittedState {
        &self.state
    }

    pub fn corpus(&self) -> &EncodedCorpus {
        &self.corpus
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }
}

/// Holds the currently published snapshot
#[derive(Debug, Default)]
pub struct StateRegistry {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot readers should use for one whole query
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.read().clone()
    }

    /// Version of the published snapshot, if any
    pub fn version(&self) -> Option<u64> {
        self.current.read().as_ref().map(|s| s.version())
    }

    /// Publish a fully built snapshot, returning the one it replaced
    pub fn publish(&self, snapshot: Snapshot) -> Option<Arc<Snapshot>> {
        let snapshot = Arc::new(snapshot);
        info!(
            version = snapshot.version(),
            candidates = snapshot.records().len(),
            dim = snapshot.state().dim(),
            "Publishing fitted state"
        );
        self.current.write().replace(snapshot)
    }

    /// Fit a new corpus and publish it; on error the current snapshot stays
    pub fn refit(&self, schema: &FieldSchema, records: Vec<CandidateRecord>) -> Result<u64> {
        let snapshot = Snapshot::build(schema, records)?;
        let version = snapshot.version();
        self.publish(snapshot);
        Ok(version)
    }
}
