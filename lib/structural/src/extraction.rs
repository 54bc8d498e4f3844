//! Structured extraction from job descriptions
//!
//! An external extractor (typically a language model behind an API) turns a
//! free-text job description into structured JSON. This module owns the
//! shapes of that JSON, a tolerant parser for raw responses, and the
//! [`CriteriaExtractor`] seam the matching pipeline calls through. No
//! backend ships here: callers plug one in via [`ResponseExtractor`].

use crate::criteria::Criteria;
use jdmatch_core::FieldValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Full details of a posting
///
/// Every field may come back null; list fields may also come back as a
/// comma-delimited string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDetails {
    #[serde(rename = "Role")]
    pub role: Option<String>,
    #[serde(rename = "Required Skills")]
    pub required_skills: FieldValue,
    #[serde(rename = "Location Preference")]
    pub location_preference: Option<String>,
    #[serde(rename = "Content Categories")]
    pub content_categories: FieldValue,
    /// Kept in the posting's own unit, e.g. "100-150 per hour"
    #[serde(rename = "Budget")]
    pub budget: FieldValue,
    #[serde(rename = "Special Preferences")]
    pub special_preferences: Option<String>,
    #[serde(rename = "Creator Name")]
    pub creator_name: Option<String>,
    #[serde(rename = "Creator Channel")]
    pub creator_channel: Option<String>,
}

impl JobDetails {
    /// Structural query criteria: the required skills, nothing else
    pub fn to_criteria(&self) -> Criteria {
        let none = FieldValue::default();
        Criteria::from_values(&self.required_skills, &none, &none, &none)
    }
}

/// Must-have requirements only
///
/// Extractors may add fields of their own; those land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MustHaveCriteria {
    pub required_skills: FieldValue,
    pub required_languages: FieldValue,
    pub required_domain: FieldValue,
    /// Minimum years, when stated
    pub required_experience: FieldValue,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MustHaveCriteria {
    /// Structural query criteria
    ///
    /// Soft skills are read from an extra `required_soft_skills` field when
    /// the extractor supplied one.
    pub fn to_criteria(&self) -> Criteria {
        let soft_skills = self
            .extra
            .get("required_soft_skills")
            .cloned()
            .map(FieldValue::from)
            .unwrap_or_default();
        Criteria::from_values(
            &self.required_skills,
            &soft_skills,
            &self.required_languages,
            &self.required_domain,
        )
    }

    /// Minimum years of experience, if it can be read as a number
    pub fn min_experience_years(&self) -> Option<f64> {
        match &self.required_experience {
            FieldValue::Text(s) => s
                .split(|c: char| !(c.is_ascii_digit() || c == '.'))
                .find(|part| !part.is_empty())
                .and_then(|part| part.parse().ok()),
            other => other.as_number().ok().flatten(),
        }
    }
}

/// Errors raised while extracting criteria
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Extractor backend failed: {0}")]
    Backend(String),

    #[error("Malformed extractor response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Extractor response is empty")]
    EmptyResponse,
}

/// Parse a raw extractor response as JSON
///
/// Accepts bare JSON, or JSON wrapped in a markdown code fence with an
/// optional language tag.
pub fn parse_response<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractionError::EmptyResponse);
    }

    match serde_json::from_str(trimmed) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let Some(fenced) = trimmed.split("```").nth(1) else {
                return Err(err.into());
            };
            debug!("Retrying extractor response inside code fence");
            let body = fenced.trim_start();
            let body = body
                .strip_prefix("json")
                .or_else(|| body.strip_prefix("JSON"))
                .unwrap_or(body);
            Ok(serde_json::from_str(body.trim())?)
        }
    }
}

/// Source of structural criteria for a job description
pub trait CriteriaExtractor: Send + Sync {
    /// `Ok(None)` means the extractor found nothing usable, and callers
    /// should fall back to another strategy.
    fn extract(&self, text: &str) -> Result<Option<Criteria>, ExtractionError>;

    fn name(&self) -> &str;
}

/// Extractor over a text-completion backend
///
/// The closure receives the full prompt and returns the raw response text.
pub struct ResponseExtractor<F> {
    name: String,
    complete: F,
}

impl<F> fmt::Debug for ResponseExtractor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseExtractor").field("name", &self.name).finish()
    }
}

const MUST_HAVE_PROMPT: &str = "From the following job description, identify only the must-have \
requirements and ignore nice-to-haves. Return JSON only with the fields required_skills (list), \
required_languages (list), required_domain (string) and required_experience (minimum years). \
Other must-have criteria may be added as extra fields. Use null or an empty list for anything \
not explicitly mentioned.";

const JOB_DETAILS_PROMPT: &str = "Extract structured job details from the following job \
description. Return JSON only with the fields \"Role\", \"Required Skills\" (list), \
\"Location Preference\", \"Content Categories\" (list), \"Budget\", \"Special Preferences\", \
\"Creator Name\" and \"Creator Channel\". Set any field not explicitly mentioned to null.";

impl<F> ResponseExtractor<F>
where
    F: Fn(&str) -> Result<String, ExtractionError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, complete: F) -> Self {
        Self {
            name: name.into(),
            complete,
        }
    }

    fn ask<T: DeserializeOwned>(&self, instructions: &str, text: &str) -> Result<T, ExtractionError> {
        let prompt = format!("{}\n\nJob Description:\n{}", instructions, text);
        let raw = (self.complete)(&prompt)?;
        parse_response(&raw)
    }

    pub fn must_haves(&self, text: &str) -> Result<MustHaveCriteria, ExtractionError> {
        self.ask(MUST_HAVE_PROMPT, text)
    }

    pub fn job_details(&self, text: &str) -> Result<JobDetails, ExtractionError> {
        self.ask(JOB_DETAILS_PROMPT, text)
    }
}

impl<F> CriteriaExtractor for ResponseExtractor<F>
where
    F: Fn(&str) -> Result<String, ExtractionError> + Send + Sync,
{
    /// Must-haves first; when those come back empty the posting's required
    /// skills are used instead.
    fn extract(&self, text: &str) -> Result<Option<Criteria>, ExtractionError> {
        let mut criteria = self.must_haves(text)?.to_criteria();
        if criteria.is_empty() {
            debug!(extractor = %self.name, "No must-haves extracted; reading job details");
            criteria = self.job_details(text)?.to_criteria();
        }
        if criteria.is_empty() {
            warn!(extractor = %self.name, "Extractor returned no usable criteria");
            return Ok(None);
        }
        Ok(Some(criteria))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD_RESPONSE: &str = r#"{
        "Role": "Producer/Video Editor",
        "Required Skills": ["Storyboarding", "Sound Designing", "Rough Cut & Sequencing", "Filming"],
        "Location Preference": "New York",
        "Content Categories": ["Entertainment", "Education", "Food & Cooking"],
        "Budget": "100-150 per hour",
        "Special Preferences": null,
        "Creator Name": "imjennim",
        "Creator Channel": "https://www.youtube.com/@imjennim"
    }"#;

    #[test]
    fn test_parse_bare_json() {
        let details: JobDetails = parse_response(JD_RESPONSE).unwrap();
        assert_eq!(details.role.as_deref(), Some("Producer/Video Editor"));
        assert_eq!(details.budget, FieldValue::from("100-150 per hour"));
        assert_eq!(details.special_preferences, None);
    }

    #[test]
    fn test_job_details_to_criteria() {
        let details: JobDetails = parse_response(JD_RESPONSE).unwrap();
        let criteria = details.to_criteria();

        assert_eq!(criteria.skills.len(), 4);
        assert!(criteria.skills.contains("rough cut & sequencing"));
        assert!(criteria.soft_skills.is_empty());
        assert!(criteria.languages.is_empty());
        assert_eq!(criteria.domain, None);
        assert!(JobDetails::default().to_criteria().is_empty());
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "Here you go:\n```json\n{\"required_skills\": [\"Filming\"], \"required_domain\": null}\n```\n";
        let must: MustHaveCriteria = parse_response(raw).unwrap();
        assert_eq!(must.required_skills, FieldValue::from(vec!["Filming"]));
        assert!(must.required_domain.is_null());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_response::<MustHaveCriteria>("   "),
            Err(ExtractionError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response::<MustHaveCriteria>("not json at all"),
            Err(ExtractionError::Malformed(_))
        ));
    }

    #[test]
    fn test_must_haves_to_criteria() {
        let must: MustHaveCriteria = serde_json::from_str(
            r#"{
                "required_skills": "Python, Excel",
                "required_languages": ["English"],
                "required_domain": "Finance",
                "required_experience": "3+ years",
                "required_soft_skills": ["Leadership"],
                "required_certification": "CPA"
            }"#,
        )
        .unwrap();

        assert_eq!(must.extra.len(), 2);
        assert_eq!(must.min_experience_years(), Some(3.0));

        let criteria = must.to_criteria();
        assert!(criteria.skills.contains("excel"));
        assert!(criteria.soft_skills.contains("leadership"));
        assert_eq!(criteria.domain.as_deref(), Some("finance"));
    }

    #[test]
    fn test_response_extractor() {
        let extractor = ResponseExtractor::new("canned", |prompt: &str| {
            assert!(prompt.contains("must-have"));
            Ok("```\n{\"required_skills\": [\"Python\"]}\n```".to_string())
        });

        let criteria = extractor.extract("We need Python").unwrap().unwrap();
        assert!(criteria.skills.contains("python"));
        assert_eq!(extractor.name(), "canned");
    }

    #[test]
    fn test_extractor_falls_back_to_job_details() {
        let extractor = ResponseExtractor::new("two-step", |prompt: &str| {
            if prompt.contains("must-have") {
                Ok(r#"{"required_skills": null}"#.to_string())
            } else {
                assert!(prompt.contains("Extract structured job details"));
                Ok(JD_RESPONSE.to_string())
            }
        });

        let criteria = extractor.extract("Producer wanted").unwrap().unwrap();
        assert!(criteria.skills.contains("storyboarding"));
        assert!(criteria.skills.contains("filming"));
        assert_eq!(criteria.domain, None);
    }

    #[test]
    fn test_extractor_empty_and_failure() {
        let empty = ResponseExtractor::new("empty", |_: &str| {
            Ok(r#"{"required_skills": [], "required_domain": null}"#.to_string())
        });
        assert!(empty.extract("anything").unwrap().is_none());

        let failing = ResponseExtractor::new("down", |_: &str| {
            Err(ExtractionError::Backend("timeout".to_string()))
        });
        assert!(matches!(
            failing.extract("anything"),
            Err(ExtractionError::Backend(_))
        ));
    }
}
