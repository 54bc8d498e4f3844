//! Criteria sets compared by the structural scorer
//!
//! Both sides of a structural comparison are a [`Criteria`]: the query's
//! requirements and a candidate's attributes. Values go through the same
//! tokenizer as the vector encoder, so list, delimited-string and null
//! inputs all land as token sets.

use jdmatch_core::{tokenize, CandidateRecord, FieldValue, TokenSet};
use serde::{Deserialize, Serialize};

/// Skills, soft skills, languages and domain of one side of a comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCriteria")]
pub struct Criteria {
    pub skills: TokenSet,
    pub soft_skills: TokenSet,
    pub languages: TokenSet,
    /// Lowercased, trimmed domain; `None` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Accepts any value shape per field, and the must-have extraction names
#[derive(Debug, Deserialize)]
struct RawCriteria {
    #[serde(default, alias = "required_skills")]
    skills: FieldValue,
    #[serde(default, alias = "required_soft_skills")]
    soft_skills: FieldValue,
    #[serde(default, alias = "required_languages")]
    languages: FieldValue,
    #[serde(default, alias = "required_domain")]
    domain: FieldValue,
}

impl From<RawCriteria> for Criteria {
    fn from(raw: RawCriteria) -> Self {
        Self::from_values(&raw.skills, &raw.soft_skills, &raw.languages, &raw.domain)
    }
}

impl Criteria {
    /// Normalize raw values into criteria
    pub fn from_values(
        skills: &FieldValue,
        soft_skills: &FieldValue,
        languages: &FieldValue,
        domain: &FieldValue,
    ) -> Self {
        Self {
            skills: tokenize(skills),
            soft_skills: tokenize(soft_skills),
            languages: tokenize(languages),
            domain: normalize_domain(domain),
        }
    }

    /// Read a candidate's criteria out of its record
    pub fn from_record(record: &CandidateRecord, fields: &CriteriaFields) -> Self {
        Self::from_values(
            record.field(&fields.skills),
            record.field(&fields.soft_skills),
            record.field(&fields.languages),
            record.field(&fields.domain),
        )
    }

    #[must_use]
    pub fn with_skills(mut self, value: impl Into<FieldValue>) -> Self {
        self.skills = tokenize(&value.into());
        self
    }

    #[must_use]
    pub fn with_soft_skills(mut self, value: impl Into<FieldValue>) -> Self {
        self.soft_skills = tokenize(&value.into());
        self
    }

    #[must_use]
    pub fn with_languages(mut self, value: impl Into<FieldValue>) -> Self {
        self.languages = tokenize(&value.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, value: impl Into<FieldValue>) -> Self {
        self.domain = normalize_domain(&value.into());
        self
    }

    /// True when no axis carries anything to compare
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.soft_skills.is_empty()
            && self.languages.is_empty()
            && self.domain.is_none()
    }
}

/// Domain is a single value: the whole string, or the first list entry
fn normalize_domain(value: &FieldValue) -> Option<String> {
    let raw = match value {
        FieldValue::Text(s) => s.as_str(),
        FieldValue::List(items) => items.iter().map(String::as_str).find(|s| !s.trim().is_empty())?,
        _ => return None,
    };
    let cleaned = raw.trim().to_lowercase();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Record columns holding each structural axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaFields {
    pub skills: String,
    pub soft_skills: String,
    pub languages: String,
    pub domain: String,
}

impl Default for CriteriaFields {
    fn default() -> Self {
        Self {
            skills: "skills".to_string(),
            soft_skills: "soft_skills".to_string(),
            languages: "languages".to_string(),
            domain: "domain".to_string(),
        }
    }
}
