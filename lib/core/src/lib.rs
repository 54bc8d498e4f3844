//! # jdmatch Core
//!
//! Core library for jdmatch: turns candidate records and free-text job
//! descriptions into comparable feature vectors and ranks candidates by
//! cosine similarity.
//!
//! This crate provides:
//!
//! - [`tokenize`] - One normalization for comma-delimited strings, lists and nulls
//! - [`Vocabulary`] - Sorted token→index table per categorical field
//! - [`NumericBounds`] - Min/max normalization per numeric field
//! - [`FittedState`] - Frozen, versioned fit output and the vector layout
//! - [`QueryProjector`] - Free text → feature vector, behind a swappable [`QueryTokenizer`]
//! - [`EncodedCorpus`] / [`ranker`] - Cosine top-K with deterministic tie-breaks
//! - [`StateRegistry`] - Atomic publication of re-fitted state
//!
//! ## Example
//!
//! ```rust
//! use jdmatch_core::{CandidateRecord, FieldSchema, FittedState, QueryProjector};
//!
//! let records = vec![
//!     CandidateRecord::new("c1").with_field("skills", "Editing"),
//!     CandidateRecord::new("c2").with_field("skills", "Editing, Animation"),
//! ];
//! let schema = FieldSchema::new(["skills"], Vec::<String>::new());
//!
//! let state = FittedState::fit(&schema, &records).unwrap();
//! let corpus = state.encode_corpus(&records).unwrap();
//!
//! let query = QueryProjector::new().project("we need someone skilled in animation", &state);
//! let ranked = corpus.rank(&query, 10, 0).unwrap();
//! assert_eq!(ranked[0].id.to_string(), "c2");
//! ```

pub mod corpus;
pub mod encoder;
pub mod error;
pub mod normalizer;
pub mod query;
pub mod ranker;
pub mod record;
pub mod registry;
pub mod schema;
pub mod state;
pub mod tokenizer;
pub mod vector;
pub mod vocabulary;

pub use corpus::{EncodedCorpus, RankedCandidate};
pub use encoder::encode;
pub use error::{Error, Result, SchemaError};
pub use normalizer::NumericBounds;
pub use query::{
    MatcherKind, Projection, QueryProjector, QueryTokenizer, SubstringMatcher, WordBoundaryMatcher,
    DEFAULT_NUMERIC_VALUE,
};
pub use ranker::Ranked;
pub use record::{CandidateId, CandidateRecord};
pub use registry::{Snapshot, StateRegistry};
pub use schema::FieldSchema;
pub use state::{FitWarning, FittedState};
pub use tokenizer::{tokenize, FieldValue, TokenSet};
pub use vector::FeatureVector;
pub use vocabulary::Vocabulary;
