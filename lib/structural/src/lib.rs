//! # jdmatch Structural
//!
//! Criteria-weighted scoring of candidates against a job's must-haves.
//!
//! Where the vector path in `jdmatch-core` ranks by overall profile
//! similarity, this crate compares explicit requirement sets axis by axis
//! and explains every score.
//!
//! ## Features
//!
//! - **Criteria**: Skills, soft skills, languages and domain, tokenized like the vector path
//! - **Jaccard overlap**: Per-axis set similarity, exact match for domain
//! - **Weights**: Configurable per axis, either kept as given or rescaled to 1.0
//! - **Explainability**: Per-axis contributions and ranking statistics
//! - **Extraction**: JSON shapes and a tolerant parser for external extractors
//!
//! ## Example
//!
//! ```rust
//! use jdmatch_core::CandidateId;
//! use jdmatch_structural::{Criteria, StructuralScorer};
//!
//! let query = Criteria::default().with_skills("Python, Excel");
//! let candidate = Criteria::default().with_skills("python, sql");
//!
//! let scorer = StructuralScorer::default();
//! let result = scorer.score(CandidateId::from("c1"), &candidate, &query);
//! assert!((result.contributions.skills - 0.1).abs() < 1e-6);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Extractor  │────>│  Criteria   │────>│   Scorer    │
//! │ (JD → JSON) │     │ (token sets)│     │  (weights)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │   Explain   │
//!                                         │  (results)  │
//!                                         └─────────────┘
//! ```

pub mod criteria;
pub mod explain;
pub mod extraction;
pub mod scorer;
pub mod similarity;
pub mod weights;

// Re-export main types for convenience
pub use criteria::{Criteria, CriteriaFields};
pub use explain::{ExplainedScore, ScoreStats, StructuralResponse};
pub use extraction::{
    parse_response, CriteriaExtractor, ExtractionError, JobDetails, MustHaveCriteria,
    ResponseExtractor,
};
pub use scorer::{ScoreResult, StructuralScorer, SubScores};
pub use similarity::{exact_match, jaccard};
pub use weights::{Axis, StructuralWeights, WeightNormalization, WeightsError};
