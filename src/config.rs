//! Matcher configuration
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid file
//! describing the creator-marketplace corpus layout.

use crate::error::{MatchError, Result};
use jdmatch_core::{FieldSchema, MatcherKind, DEFAULT_NUMERIC_VALUE};
use jdmatch_structural::{CriteriaFields, StructuralWeights};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Encoded fields, in vector layout order
    pub schema: FieldSchema,
    /// Results returned by vector ranking
    pub top_k: usize,
    /// Value of every numeric dimension in a projected query
    pub numeric_default: f32,
    pub query_matcher: MatcherKind,
    /// Candidates per rayon shard; 0 ranks sequentially
    pub parallel_shard_size: usize,
    pub structural: StructuralConfig,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            schema: FieldSchema::default(),
            top_k: 10,
            numeric_default: DEFAULT_NUMERIC_VALUE,
            query_matcher: MatcherKind::default(),
            parallel_shard_size: 0,
            structural: StructuralConfig::default(),
        }
    }
}

/// Structural scoring settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralConfig {
    /// Candidate record columns for each axis
    pub fields: CriteriaFields,
    pub weights: StructuralWeights,
}

impl MatcherConfig {
    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| MatchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: MatcherConfig =
            serde_json::from_str(&raw).map_err(|source| MatchError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;
        if self.top_k == 0 {
            return Err(MatchError::Config("top_k must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.numeric_default) {
            return Err(MatchError::Config(format!(
                "numeric_default must be within [0, 1], got {}",
                self.numeric_default
            )));
        }
        self.structural.weights.resolve()?;
        Ok(())
    }
}
