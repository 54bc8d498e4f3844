//! Fitted encoding state
//!
//! [`FittedState`] is the output of the fit phase: one vocabulary per
//! categorical field and one set of bounds per numeric field, in schema
//! order. It is immutable once built and carries a version so vectors and
//! encoded corpora can be tied back to the fit that produced them.

use crate::corpus::EncodedCorpus;
use crate::encoder;
use crate::error::{Result, SchemaError};
use crate::normalizer::NumericBounds;
use crate::record::CandidateRecord;
use crate::schema::FieldSchema;
use crate::vector::FeatureVector;
use crate::vocabulary::Vocabulary;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Non-fatal degenerate input found while fitting
///
/// Each one is resolved to a neutral encoding (empty block, zero scalar).
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitWarning {
    #[error("Field '{field}' has no tokens in the corpus and contributes no dimensions")]
    EmptyVocabulary { field: String },

    #[error("Field '{field}' has the single value {value} and always normalizes to 0")]
    ZeroVariance { field: String, value: f64 },

    #[error("Field '{field}' has no numeric values and always normalizes to 0")]
    NoNumericValues { field: String },
}

/// Frozen vocabularies and numeric bounds for one corpus version
#[derive(Debug, Clone)]
pub struct FittedState {
    version: u64,
    schema: FieldSchema,
    vocabularies: Vec<Vocabulary>,
    bounds: Vec<NumericBounds>,
    warnings: Vec<FitWarning>,
}

impl FittedState {
    /// Fit vocabularies and numeric bounds over a corpus
    ///
    /// Fails on the first schema problem without producing any state:
    /// invalid declarations, a declared field no record carries, or a
    /// non-numeric value in a numeric field. An empty corpus fits to an
    /// empty vocabulary for every categorical field.
    pub fn fit(schema: &FieldSchema, records: &[CandidateRecord]) -> Result<Self> {
        schema.validate()?;

        if !records.is_empty() {
            for name in schema.field_names() {
                if !records.iter().any(|r| r.has_field(name)) {
                    return Err(SchemaError::MissingField(name.to_string()).into());
                }
            }
        }

        let mut warnings = Vec::new();

        let mut vocabularies = Vec::with_capacity(schema.categorical.len());
        for field in &schema.categorical {
            let vocab = Vocabulary::fit(field.as_str(), records.iter().map(|r| r.field(field)));
            if vocab.is_empty() {
                warnings.push(FitWarning::EmptyVocabulary { field: field.clone() });
            }
            vocabularies.push(vocab);
        }

        let mut bounds = Vec::with_capacity(schema.numeric.len());
        for field in &schema.numeric {
            let fitted = NumericBounds::fit(field.as_str(), records.iter().map(|r| r.field(field)))?;
            if fitted.observed == 0 {
                warnings.push(FitWarning::NoNumericValues { field: field.clone() });
            } else if fitted.is_degenerate() {
                warnings.push(FitWarning::ZeroVariance {
                    field: field.clone(),
                    value: fitted.min,
                });
            }
            bounds.push(fitted);
        }

        let state = Self {
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
            schema: schema.clone(),
            vocabularies,
            bounds,
            warnings,
        };

        for warning in &state.warnings {
            warn!(version = state.version, "{}", warning);
        }
        info!(
            version = state.version,
            records = records.len(),
            dim = state.dim(),
            "Fitted encoding state"
        );

        Ok(state)
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Vocabularies in declared categorical order
    pub fn vocabularies(&self) -> &[Vocabulary] {
        &self.vocabularies
    }

    pub fn vocabulary(&self, field: &str) -> Option<&Vocabulary> {
        self.vocabularies.iter().find(|v| v.field() == field)
    }

    /// Numeric bounds in declared numeric order
    pub fn bounds(&self) -> &[NumericBounds] {
        &self.bounds
    }

    pub fn bounds_for(&self, field: &str) -> Option<&NumericBounds> {
        self.bounds.iter().find(|b| b.field == field)
    }

    pub fn warnings(&self) -> &[FitWarning] {
        &self.warnings
    }

    /// Length of every vector encoded against this state
    pub fn dim(&self) -> usize {
        self.categorical_dim() + self.bounds.len()
    }

    /// Length of the multi-hot part of the layout
    pub fn categorical_dim(&self) -> usize {
        self.vocabularies.iter().map(Vocabulary::len).sum()
    }

    /// One name per dimension: `<field>_<token>` for multi-hot dimensions,
    /// the bare field name for numeric ones
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.dim());
        for vocab in &self.vocabularies {
            names.extend(vocab.tokens().iter().map(|t| format!("{}_{}", vocab.field(), t)));
        }
        names.extend(self.bounds.iter().map(|b| b.field.clone()));
        names
    }

    /// Encode one record against this state
    pub fn encode(&self, record: &CandidateRecord) -> Result<FeatureVector> {
        encoder::encode(record, self)
    }

    /// Encode a whole corpus, bound to this state's version
    pub fn encode_corpus(&self, records: &[CandidateRecord]) -> Result<EncodedCorpus> {
        EncodedCorpus::build(self, records)
    }
}
