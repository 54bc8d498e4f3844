//! Field value normalization
//!
//! Corpus rows and extracted criteria carry values of varying shape: a
//! comma-separated string, a list of strings, a number or nothing at all.
//! Everything that compares categorical values goes through [`tokenize`] so
//! the same normalization applies at fit, transform and scoring time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Delimiter for multi-valued string fields
pub const TOKEN_DELIMITER: char = ',';

/// A normalized token set. Ordered so iteration is deterministic.
pub type TokenSet = BTreeSet<String>;

/// A raw field value as supplied by corpus ingestion or an extractor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    /// Absent or explicit null
    #[default]
    Null,
    /// A single string, possibly comma-delimited
    Text(String),
    /// An explicit list of strings
    List(Vec<String>),
    /// A numeric scalar
    Number(f64),
    /// Anything else (booleans, objects), kept in its JSON rendering
    Other(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Coerce to a number.
    ///
    /// `Ok(None)` means the value is missing (null or blank text).
    /// `Err` carries a rendering of the value that could not be coerced.
    pub fn as_number(&self) -> Result<Option<f64>, String> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Number(n) if n.is_finite() => Ok(Some(*n)),
            FieldValue::Number(n) => Err(n.to_string()),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(Some(n)),
                    _ => Err(format!("\"{}\"", s)),
                }
            }
            FieldValue::List(items) => Err(format!("{:?}", items)),
            FieldValue::Other(raw) => Err(raw.clone()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Other(n.to_string()),
            },
            // Non-string elements never produce tokens
            Value::Array(items) => FieldValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => FieldValue::Other(other.to_string()),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Text(s) => Value::String(s),
            FieldValue::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
            FieldValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Other(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Normalize a field value into a set of clean tokens
///
/// Strings split on [`TOKEN_DELIMITER`]; every token is trimmed and
/// lowercased and empty tokens are dropped. Numbers and other scalars
/// yield the empty set.
pub fn tokenize(value: &FieldValue) -> TokenSet {
    match value {
        FieldValue::Text(s) => tokenize_str(s),
        FieldValue::List(items) => items.iter().filter_map(|item| clean_token(item)).collect(),
        FieldValue::Null | FieldValue::Number(_) | FieldValue::Other(_) => TokenSet::new(),
    }
}

/// Tokenize a single delimited string
pub fn tokenize_str(s: &str) -> TokenSet {
    s.split(TOKEN_DELIMITER).filter_map(clean_token).collect()
}

/// Trim and lowercase a token, `None` if nothing remains
pub fn clean_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
