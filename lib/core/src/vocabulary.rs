//! Per-field token vocabularies
//!
//! A vocabulary is the sorted set of every token seen for one categorical
//! field in the fit corpus. Its index order is the order of that field's
//! multi-hot block.

use crate::tokenizer::{tokenize, FieldValue, TokenSet};
use ahash::AHashMap;

/// Fitted token table for one categorical field
#[derive(Debug, Clone)]
pub struct Vocabulary {
    field: String,
    tokens: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from every value of `field` in the corpus
    ///
    /// Tokens are unioned and sorted before indices are assigned, so the
    /// mapping depends only on the token set and never on row order.
    pub fn fit<'a, I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = &'a FieldValue>,
    {
        let mut all = TokenSet::new();
        for value in values {
            all.extend(tokenize(value));
        }
        Self::from_tokens(field, all)
    }

    /// Build directly from a token set (already normalized)
    pub fn from_tokens(field: impl Into<String>, tokens: TokenSet) -> Self {
        // BTreeSet iteration is sorted and deduplicated
        let tokens: Vec<String> = tokens.into_iter().collect();
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self {
            field: field.into(),
            tokens,
            index,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of a normalized token, `None` for tokens unseen at fit time
    #[inline]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Tokens in index order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.tokens.iter().enumerate().map(|(i, t)| (i, t.as_str()))
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from `tokens`
        self.field == other.field && self.tokens == other.tokens
    }
}
