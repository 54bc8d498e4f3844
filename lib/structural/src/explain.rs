//! Explainability for structural scores
//!
//! Serializable output showing how each candidate's score breaks down
//! per axis, plus summary statistics over a ranking.

use crate::scorer::ScoreResult;
use crate::weights::Axis;
use serde::Serialize;
use std::collections::BTreeMap;

/// A structural result with its per-axis breakdown keyed by axis name
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedScore {
    pub id: String,
    pub score: f32,
    /// Per-axis contributions (already weighted)
    pub explain: BTreeMap<&'static str, f32>,
}

impl From<&ScoreResult> for ExplainedScore {
    fn from(result: &ScoreResult) -> Self {
        Self {
            id: result.id.to_string(),
            score: result.score,
            explain: Axis::ALL
                .into_iter()
                .map(|axis| (axis.name(), result.contributions.get(axis)))
                .collect(),
        }
    }
}

/// Response wrapping a full structural ranking
#[derive(Debug, Clone, Serialize)]
pub struct StructuralResponse {
    pub result: Vec<ExplainedScore>,
    pub stats: ScoreStats,
}

impl StructuralResponse {
    pub fn from_results(results: &[ScoreResult]) -> Self {
        Self {
            result: results.iter().map(ExplainedScore::from).collect(),
            stats: ScoreStats::compute(results),
        }
    }
}

/// Summary statistics for a structural ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStats {
    /// Number of candidates scored
    pub candidates_count: usize,
    /// Number of candidates with a score above zero
    pub matched_count: usize,
    pub avg_score: f32,
    pub best_score: f32,
    /// Axis that contributed most to the best result
    pub top_contributing_axis: Option<Axis>,
}

impl ScoreStats {
    /// Compute stats from results sorted best first
    pub fn compute(results: &[ScoreResult]) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count: 0,
                matched_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_axis: None,
            };
        };

        let total: f32 = results.iter().map(|r| r.score).sum();
        Self {
            candidates_count: results.len(),
            matched_count: results.iter().filter(|r| r.score > 0.0).count(),
            avg_score: total / results.len() as f32,
            best_score: best.score,
            top_contributing_axis: best.top_axis(),
        }
    }
}
