//! Free-text query projection
//!
//! Maps a job description into the vector space of a fitted state. Which
//! vocabulary tokens count as present in the text is decided by a
//! [`QueryTokenizer`]; the default [`SubstringMatcher`] accepts any
//! contiguous occurrence, so short tokens can match inside unrelated words
//! ("art" in "start"). [`WordBoundaryMatcher`] is the stricter alternative.

use crate::encoder::assemble;
use crate::state::FittedState;
use crate::vector::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Neutral value for numeric dimensions a free-text query carries no signal for
pub const DEFAULT_NUMERIC_VALUE: f32 = 0.5;

/// Decides whether a vocabulary token occurs in a query text
///
/// Both arguments are already lowercased.
pub trait QueryTokenizer: Send + Sync + std::fmt::Debug {
    fn matches(&self, text: &str, token: &str) -> bool;

    fn name(&self) -> &'static str;
}

/// Token matches if it appears anywhere in the text
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl QueryTokenizer for SubstringMatcher {
    #[inline]
    fn matches(&self, text: &str, token: &str) -> bool {
        text.contains(token)
    }

    fn name(&self) -> &'static str {
        "substring"
    }
}

/// Token matches only where it is not glued to letters or digits
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundaryMatcher;

impl QueryTokenizer for WordBoundaryMatcher {
    fn matches(&self, text: &str, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        text.match_indices(token).any(|(start, found)| {
            let before = text[..start].chars().next_back();
            let after = text[start + found.len()..].chars().next();
            !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
        })
    }

    fn name(&self) -> &'static str {
        "word_boundary"
    }
}

/// Named matcher selection, for configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    #[default]
    Substring,
    WordBoundary,
}

impl MatcherKind {
    pub fn build(self) -> Arc<dyn QueryTokenizer> {
        match self {
            MatcherKind::Substring => Arc::new(SubstringMatcher),
            MatcherKind::WordBoundary => Arc::new(WordBoundaryMatcher),
        }
    }
}

/// A projected query with the tokens that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub vector: FeatureVector,
    /// Matched vocabulary tokens per categorical field (fields with no match omitted)
    pub matched: BTreeMap<String, Vec<String>>,
}

impl Projection {
    pub fn matched_count(&self) -> usize {
        self.matched.values().map(Vec::len).sum()
    }
}

/// Projects free text into a fitted state's vector space
#[derive(Debug, Clone)]
pub struct QueryProjector {
    tokenizer: Arc<dyn QueryTokenizer>,
    numeric_default: f32,
}

impl Default for QueryProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryProjector {
    /// Substring matching with the 0.5 numeric default
    pub fn new() -> Self {
        Self {
            tokenizer: Arc::new(SubstringMatcher),
            numeric_default: DEFAULT_NUMERIC_VALUE,
        }
    }

    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn QueryTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    #[must_use]
    pub fn with_numeric_default(mut self, value: f32) -> Self {
        self.numeric_default = value;
        self
    }

    pub fn tokenizer(&self) -> &dyn QueryTokenizer {
        self.tokenizer.as_ref()
    }

    pub fn numeric_default(&self) -> f32 {
        self.numeric_default
    }

    /// Project text into a feature vector
    pub fn project(&self, text: &str, state: &FittedState) -> FeatureVector {
        self.project_explained(text, state).vector
    }

    /// Project text and report which tokens matched
    ///
    /// Every numeric dimension is set to the numeric default as-is, not
    /// passed through the fitted bounds.
    pub fn project_explained(&self, text: &str, state: &FittedState) -> Projection {
        let text = text.to_lowercase();
        let mut matched = BTreeMap::new();

        let vector = assemble(
            state,
            |vocab, block| {
                let mut hits = Vec::new();
                for (i, token) in vocab.iter() {
                    if self.tokenizer.matches(&text, token) {
                        block[i] = 1.0;
                        hits.push(token.to_string());
                    }
                }
                if !hits.is_empty() {
                    matched.insert(vocab.field().to_string(), hits);
                }
            },
            |_| Ok::<f32, Infallible>(self.numeric_default),
        );
        let vector = match vector {
            Ok(vector) => vector,
            Err(never) => match never {},
        };

        let projection = Projection { vector, matched };
        debug!(
            version = state.version(),
            matcher = self.tokenizer.name(),
            matched = projection.matched_count(),
            "Projected query text"
        );
        projection
    }
}
