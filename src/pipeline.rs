//! Matching pipeline
//!
//! [`Matcher`] ties a loaded corpus to both matching paths: free-text
//! projection ranked by cosine similarity, and structural criteria scored
//! per axis. [`Matcher::match_text`] tries an extractor first and falls
//! back to projection when there is none or it produces nothing.

use crate::config::MatcherConfig;
use crate::error::{MatchError, Result};
use jdmatch_core::{
    CandidateRecord, FitWarning, NumericBounds, QueryProjector, RankedCandidate, Snapshot,
    StateRegistry,
};
use jdmatch_structural::{CriteriaExtractor, Criteria, ScoreResult, StructuralScorer};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which path produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Structural,
    Vector,
}

/// Cosine top-K for a free-text query
#[derive(Debug, Clone, Serialize)]
pub struct VectorMatches {
    /// Fit version the query was projected against
    pub version: u64,
    /// Vocabulary tokens found in the text, per field
    pub matched: BTreeMap<String, Vec<String>>,
    pub results: Vec<RankedCandidate>,
}

/// Full structural ranking
#[derive(Debug, Clone, Serialize)]
pub struct StructuralMatches {
    pub version: u64,
    pub criteria: Criteria,
    pub results: Vec<ScoreResult>,
}

/// Result of [`Matcher::match_text`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MatchOutcome {
    Structural(StructuralMatches),
    Vector(VectorMatches),
}

impl MatchOutcome {
    pub fn strategy(&self) -> MatchStrategy {
        match self {
            MatchOutcome::Structural(_) => MatchStrategy::Structural,
            MatchOutcome::Vector(_) => MatchStrategy::Vector,
        }
    }
}

/// Overview of the current fit
#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub version: u64,
    pub records: usize,
    pub dim: usize,
    /// Vocabulary size per categorical field, in layout order
    pub vocabularies: Vec<(String, usize)>,
    pub bounds: Vec<NumericBounds>,
    pub warnings: Vec<FitWarning>,
}

pub struct Matcher {
    config: MatcherConfig,
    registry: StateRegistry,
    projector: QueryProjector,
    scorer: StructuralScorer,
    extractor: RwLock<Option<Arc<dyn CriteriaExtractor>>>,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("config", &self.config)
            .field("version", &self.registry.version())
            .field(
                "extractor",
                &self.extractor.read().as_ref().map(|e| e.name().to_string()),
            )
            .finish()
    }
}

impl Matcher {
    /// Create a matcher with no corpus loaded
    pub fn new(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        let projector = QueryProjector::new()
            .with_tokenizer(config.query_matcher.build())
            .with_numeric_default(config.numeric_default);
        let scorer = StructuralScorer::new(config.structural.weights)?;
        Ok(Self {
            config,
            registry: StateRegistry::new(),
            projector,
            scorer,
            extractor: RwLock::new(None),
        })
    }

    #[must_use]
    pub fn with_extractor(self, extractor: Arc<dyn CriteriaExtractor>) -> Self {
        self.set_extractor(Some(extractor));
        self
    }

    /// Install or remove the extractor used by [`Matcher::match_text`]
    pub fn set_extractor(&self, extractor: Option<Arc<dyn CriteriaExtractor>>) {
        *self.extractor.write() = extractor;
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn scorer(&self) -> &StructuralScorer {
        &self.scorer
    }

    /// Fit and publish a corpus, replacing any previous one
    ///
    /// Queries already running finish on the version they started with.
    pub fn load(&self, records: Vec<CandidateRecord>) -> Result<u64> {
        Ok(self.registry.refit(&self.config.schema, records)?)
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.registry.current().ok_or(MatchError::NotLoaded)
    }

    /// Project free text and return the top-K candidates by cosine similarity
    pub fn rank_text(&self, text: &str) -> Result<VectorMatches> {
        let snapshot = self.snapshot()?;
        let projection = self.projector.project_explained(text, snapshot.state());
        debug!(
            version = snapshot.version(),
            matched = projection.matched_count(),
            "Projected query"
        );

        let results = snapshot.corpus().rank(
            &projection.vector,
            self.config.top_k,
            self.config.parallel_shard_size,
        )?;
        Ok(VectorMatches {
            version: snapshot.version(),
            matched: projection.matched,
            results,
        })
    }

    /// Score every loaded candidate against structural criteria
    pub fn score_criteria(&self, criteria: &Criteria) -> Result<StructuralMatches> {
        let snapshot = self.snapshot()?;
        let results =
            self.scorer
                .rank_records(criteria, snapshot.records(), &self.config.structural.fields);
        Ok(StructuralMatches {
            version: snapshot.version(),
            criteria: criteria.clone(),
            results,
        })
    }

    /// Match a job description by whichever path is available
    ///
    /// With an extractor installed its criteria drive a structural ranking.
    /// An extractor error or an empty extraction falls back to projection.
    pub fn match_text(&self, text: &str) -> Result<MatchOutcome> {
        let extractor = self.extractor.read().clone();
        if let Some(extractor) = extractor {
            match extractor.extract(text) {
                Ok(Some(criteria)) => {
                    info!(extractor = extractor.name(), "Matching on extracted criteria");
                    return self.score_criteria(&criteria).map(MatchOutcome::Structural);
                }
                Ok(None) => {
                    debug!(extractor = extractor.name(), "No criteria extracted; using projection");
                }
                Err(e) => {
                    warn!(extractor = extractor.name(), error = %e, "Extraction failed; using projection");
                }
            }
        }
        self.rank_text(text).map(MatchOutcome::Vector)
    }

    pub fn summary(&self) -> Result<FitSummary> {
        let snapshot = self.snapshot()?;
        let state = snapshot.state();
        Ok(FitSummary {
            version: snapshot.version(),
            records: snapshot.records().len(),
            dim: state.dim(),
            vocabularies: state
                .vocabularies()
                .iter()
                .map(|v| (v.field().to_string(), v.len()))
                .collect(),
            bounds: state.bounds().to_vec(),
            warnings: state.warnings().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdmatch_core::FieldSchema;
    use jdmatch_structural::{ExtractionError, ResponseExtractor};

    fn config() -> MatcherConfig {
        MatcherConfig {
            schema: FieldSchema::new(["skills"], ["rate"]),
            ..MatcherConfig::default()
        }
    }

    fn records() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new("c1")
                .with_field("skills", "Editing")
                .with_field("rate", 50.0),
            CandidateRecord::new("c2")
                .with_field("skills", "Editing, Animation")
                .with_field("rate", 150.0),
        ]
    }

    #[test]
    fn test_not_loaded() {
        let matcher = Matcher::new(config()).unwrap();
        assert!(matches!(matcher.rank_text("anything"), Err(MatchError::NotLoaded)));
        assert!(matches!(matcher.summary(), Err(MatchError::NotLoaded)));
    }

    #[test]
    fn test_rank_text() {
        let matcher = Matcher::new(config()).unwrap();
        let version = matcher.load(records()).unwrap();

        let matches = matcher.rank_text("Looking for animation work").unwrap();
        assert_eq!(matches.version, version);
        assert_eq!(matches.results[0].id.to_string(), "c2");
        assert_eq!(matches.matched["skills"], vec!["animation".to_string()]);
    }

    #[test]
    fn test_match_text_without_extractor_uses_projection() {
        let matcher = Matcher::new(config()).unwrap();
        matcher.load(records()).unwrap();

        let outcome = matcher.match_text("editing").unwrap();
        assert_eq!(outcome.strategy(), MatchStrategy::Vector);
    }

    #[test]
    fn test_match_text_with_extractor() {
        let extractor = ResponseExtractor::new("canned", |_: &str| {
            Ok(r#"{"required_skills": ["Animation"]}"#.to_string())
        });
        let matcher = Matcher::new(config()).unwrap().with_extractor(Arc::new(extractor));
        matcher.load(records()).unwrap();

        let outcome = matcher.match_text("animation please").unwrap();
        match outcome {
            MatchOutcome::Structural(matches) => {
                assert_eq!(matches.results.len(), 2);
                assert_eq!(matches.results[0].id.to_string(), "c2");
                // Skills overlap 1/2, plus the domain neither side names
                assert!((matches.results[0].score - 0.35).abs() < 1e-6);
            }
            other => panic!("expected structural outcome, got {:?}", other.strategy()),
        }
    }

    #[test]
    fn test_match_text_extractor_failure_falls_back() {
        let extractor = ResponseExtractor::new("down", |_: &str| {
            Err(ExtractionError::Backend("unavailable".to_string()))
        });
        let matcher = Matcher::new(config()).unwrap().with_extractor(Arc::new(extractor));
        matcher.load(records()).unwrap();

        let outcome = matcher.match_text("animation").unwrap();
        assert_eq!(outcome.strategy(), MatchStrategy::Vector);

        matcher.set_extractor(None);
        assert_eq!(matcher.match_text("animation").unwrap().strategy(), MatchStrategy::Vector);
    }

    #[test]
    fn test_summary() {
        let matcher = Matcher::new(config()).unwrap();
        matcher.load(records()).unwrap();

        let summary = matcher.summary().unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.dim, 3);
        assert_eq!(summary.vocabularies, vec![("skills".to_string(), 2)]);
        assert_eq!(summary.bounds[0].min, 50.0);
        assert!(summary.warnings.is_empty());
    }
}
