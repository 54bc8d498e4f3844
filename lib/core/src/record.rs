use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use crate::tokenizer::FieldValue;

/// Opaque candidate identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Integer(u64),
    Uuid(Uuid),
    String(String),
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateId::String(s) => write!(f, "{}", s),
            CandidateId::Uuid(u) => write!(f, "{}", u),
            CandidateId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        CandidateId::String(s)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        CandidateId::String(s.to_string())
    }
}

impl From<u64> for CandidateId {
    fn from(i: u64) -> Self {
        CandidateId::Integer(i)
    }
}

impl From<Uuid> for CandidateId {
    fn from(u: Uuid) -> Self {
        CandidateId::Uuid(u)
    }
}

/// A candidate row from the corpus
///
/// Identity fields are typed; every other column lands in `attributes`
/// keyed by its column name, which is what the field schema refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub attributes: HashMap<String, FieldValue>,
}

impl CandidateRecord {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<CandidateId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            location: None,
            attributes: HashMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.attributes.insert(field.into(), value.into());
        self
    }

    /// Value of a field; missing fields read as null
    pub fn field(&self, name: &str) -> &FieldValue {
        static NULL: FieldValue = FieldValue::Null;
        self.attributes.get(name).unwrap_or(&NULL)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}
