//! Similarity primitives for structural scoring
//!
//! All functions return a score in range [0.0, 1.0] where 1.0 means identical.

use jdmatch_core::TokenSet;

/// Jaccard index of two token sets
///
/// `|A ∩ B| / |A ∪ B|`, and 0 when either set is empty (including
/// empty against empty).
pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    intersection as f32 / union as f32
}

/// Case-insensitive exact match of two optional values
///
/// 1.0 on a match, 0.0 otherwise; a missing value on either side never
/// matches.
pub fn exact_match(a: Option<&str>, b: Option<&str>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) if a.trim().to_lowercase() == b.trim().to_lowercase() => 1.0,
        _ => 0.0,
    }
}
