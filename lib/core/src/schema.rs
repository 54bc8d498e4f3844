//! Field schema definitions
//!
//! Declares which record columns are encoded and in what order. The order
//! is the vector layout: categorical blocks first, numeric scalars after.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared categorical and numeric fields, in layout order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSchema {
    /// Multi-valued categorical fields, encoded as multi-hot blocks
    #[serde(default)]
    pub categorical: Vec<String>,

    /// Numeric fields, encoded as min/max normalized scalars
    #[serde(default)]
    pub numeric: Vec<String>,
}

impl FieldSchema {
    pub fn new<C, N>(categorical: C, numeric: N) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            categorical: categorical.into_iter().map(Into::into).collect(),
            numeric: numeric.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject blank names and names declared twice (across both lists)
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for name in self.field_names() {
            if name.trim().is_empty() {
                return Err(SchemaError::BlankFieldName);
            }
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateField(name.to_string()));
            }
        }
        Ok(())
    }

    /// All declared names, categorical first
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.categorical
            .iter()
            .chain(self.numeric.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categorical.is_empty() && self.numeric.is_empty()
    }
}

impl Default for FieldSchema {
    /// Columns of the creator-marketplace candidate export
    fn default() -> Self {
        Self::new(
            [
                "Skills",
                "Software",
                "Content Verticals",
                "Creative Styles",
                "Platforms",
                "Past Creators",
            ],
            ["Monthly Rate", "Hourly Rate", "# of Views by Creators"],
        )
    }
}
