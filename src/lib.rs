//! # jdmatch
//!
//! Match free-text job descriptions against a corpus of candidate profiles.
//!
//! jdmatch offers two matching paths over the same corpus:
//!
//! - **Vector ranking**: candidates are multi-hot encoded over vocabularies
//!   fitted from the corpus, the job text is projected into the same space by
//!   token matching, and candidates are ranked by cosine similarity.
//! - **Structural scoring**: explicit must-have criteria (skills, soft
//!   skills, languages, domain) are compared per axis by Jaccard overlap and
//!   combined with configurable weights.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! jdmatch rank --candidates candidates.json "Video editor with animation skills"
//! jdmatch score --candidates candidates.json --criteria must_haves.json
//! jdmatch inspect --candidates candidates.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use jdmatch::prelude::*;
//!
//! let config = MatcherConfig {
//!     schema: FieldSchema::new(["skills"], Vec::<String>::new()),
//!     ..MatcherConfig::default()
//! };
//! let matcher = Matcher::new(config).unwrap();
//! matcher
//!     .load(vec![
//!         CandidateRecord::new("c1").with_field("skills", "Editing"),
//!         CandidateRecord::new("c2").with_field("skills", "Editing, Animation"),
//!     ])
//!     .unwrap();
//!
//! let matches = matcher.rank_text("we need animation").unwrap();
//! assert_eq!(matches.results[0].id.to_string(), "c2");
//! ```
//!
//! ## Crate Structure
//!
//! - [`jdmatch-core`](https://docs.rs/jdmatch-core) - Tokenizer, fitted state, projection, cosine ranking
//! - [`jdmatch-structural`](https://docs.rs/jdmatch-structural) - Criteria, Jaccard scoring, extraction schemas

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{MatcherConfig, StructuralConfig};
pub use error::{MatchError, Result};
pub use pipeline::{
    FitSummary, MatchOutcome, MatchStrategy, Matcher, StructuralMatches, VectorMatches,
};

// Re-export core types
pub use jdmatch_core::{
    CandidateId, CandidateRecord, EncodedCorpus, FeatureVector, FieldSchema, FieldValue,
    FitWarning, FittedState, MatcherKind, QueryProjector, QueryTokenizer, RankedCandidate,
    SchemaError, StateRegistry,
};

// Re-export structural scoring
pub use jdmatch_structural::{
    Axis, Criteria, CriteriaExtractor, CriteriaFields, ExtractionError, JobDetails,
    MustHaveCriteria, ResponseExtractor, ScoreResult, ScoreStats, StructuralScorer,
    StructuralWeights, WeightNormalization,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CandidateId, CandidateRecord, Criteria, CriteriaExtractor, FieldSchema, FieldValue,
        MatchError, MatchOutcome, Matcher, MatcherConfig, Result, StructuralScorer,
        StructuralWeights,
    };
}
