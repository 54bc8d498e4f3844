//! Structural scorer
//!
//! Scores candidates against query criteria axis by axis and combines the
//! sub-scores with the configured weights. Unlike the cosine ranker the
//! result is the full candidate list, never truncated.

use crate::criteria::{Criteria, CriteriaFields};
use crate::similarity::{exact_match, jaccard};
use crate::weights::{Axis, StructuralWeights, WeightsError};
use jdmatch_core::{CandidateId, CandidateRecord};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// One value per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SubScores {
    pub skills: f32,
    pub soft_skills: f32,
    pub languages: f32,
    pub domain: f32,
}

impl SubScores {
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Skills => self.skills,
            Axis::SoftSkills => self.soft_skills,
            Axis::Languages => self.languages,
            Axis::Domain => self.domain,
        }
    }

    /// Multiply each axis by its weight
    pub fn weighted(&self, weights: &StructuralWeights) -> SubScores {
        SubScores {
            skills: self.skills * weights.skills,
            soft_skills: self.soft_skills * weights.soft_skills,
            languages: self.languages * weights.languages,
            domain: self.domain * weights.domain,
        }
    }

    pub fn total(&self) -> f32 {
        Axis::ALL.iter().map(|a| self.get(*a)).sum()
    }
}

/// Structural score of one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub id: CandidateId,
    /// Weighted sum of the sub-scores
    pub score: f32,
    /// Raw per-axis similarity in [0, 1]
    pub sub_scores: SubScores,
    /// Per-axis contribution to `score` (already weighted)
    pub contributions: SubScores,
}

impl ScoreResult {
    /// Axis that added most to the score; `None` when nothing did
    pub fn top_axis(&self) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|a| self.contributions.get(*a) > 0.0)
            .max_by_key(|a| OrderedFloat(self.contributions.get(*a)))
    }
}

/// Scorer over resolved weights
#[derive(Debug, Clone)]
pub struct StructuralScorer {
    weights: StructuralWeights,
}

impl Default for StructuralScorer {
    /// Historical weights, kept at their 0.8 total
    fn default() -> Self {
        Self {
            weights: StructuralWeights::default(),
        }
    }
}

impl StructuralScorer {
    /// Create a scorer; weights are validated and normalized per their mode
    pub fn new(weights: StructuralWeights) -> Result<Self, WeightsError> {
        Ok(Self {
            weights: weights.resolve()?,
        })
    }

    /// Weights actually applied
    pub fn weights(&self) -> &StructuralWeights {
        &self.weights
    }

    /// Per-axis similarity between a candidate and the query
    pub fn sub_scores(&self, candidate: &Criteria, query: &Criteria) -> SubScores {
        SubScores {
            skills: jaccard(&candidate.skills, &query.skills),
            soft_skills: jaccard(&candidate.soft_skills, &query.soft_skills),
            languages: jaccard(&candidate.languages, &query.languages),
            domain: match (&candidate.domain, &query.domain) {
                (None, None) if self.weights.match_missing_domain => 1.0,
                (a, b) => exact_match(a.as_deref(), b.as_deref()),
            },
        }
    }

    /// Score one candidate
    pub fn score(&self, id: CandidateId, candidate: &Criteria, query: &Criteria) -> ScoreResult {
        let sub_scores = self.sub_scores(candidate, query);
        let contributions = sub_scores.weighted(&self.weights);
        ScoreResult {
            id,
            score: contributions.total(),
            sub_scores,
            contributions,
        }
    }

    /// Score and sort every candidate, best first
    ///
    /// Equal scores keep input order.
    pub fn rank<I>(&self, query: &Criteria, candidates: I) -> Vec<ScoreResult>
    where
        I: IntoIterator<Item = (CandidateId, Criteria)>,
    {
        let results = candidates
            .into_iter()
            .map(|(id, criteria)| self.score(id, &criteria, query))
            .collect();
        sort_results(results)
    }

    /// Score corpus records in parallel, reading criteria out of `fields`
    pub fn rank_records(
        &self,
        query: &Criteria,
        records: &[CandidateRecord],
        fields: &CriteriaFields,
    ) -> Vec<ScoreResult> {
        if query.is_empty() {
            debug!("Structural query has no criteria; only a shared missing domain can score");
        }
        let results = records
            .par_iter()
            .map(|record| {
                let criteria = Criteria::from_record(record, fields);
                self.score(record.id.clone(), &criteria, query)
            })
            .collect();
        sort_results(results)
    }

    /// Create a new scorer with some axis weights replaced
    ///
    /// Overrides are validated like configured weights; the normalization
    /// mode is kept.
    pub fn with_weights(&self, overrides: &[(Axis, f32)]) -> Result<StructuralScorer, WeightsError> {
        let mut weights = self.weights;
        for (axis, weight) in overrides {
            weights.set(*axis, *weight);
        }
        StructuralScorer::new(weights)
    }
}

fn sort_results(mut results: Vec<ScoreResult>) -> Vec<ScoreResult> {
    // Stable: ties stay in input order
    results.sort_by(|a, b| OrderedFloat(b.score).cmp(&OrderedFloat(a.score)));
    results
}
