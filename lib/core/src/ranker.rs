//! Cosine ranking
//!
//! Scores a query vector against every candidate vector and returns the
//! top `k`. Ordering is by descending score; equal scores keep corpus
//! order, so the result is fully determined by the inputs. The sharded
//! variant scores shards on the rayon pool and merges them with the same
//! ordering, giving results identical to the sequential path.

use crate::vector::FeatureVector;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// A scored position in the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranked {
    /// Index of the candidate in the input slice
    pub position: usize,
    /// Cosine similarity with the query
    pub score: f32,
}

/// Descending score, then ascending position
#[inline]
fn by_score_then_position(a: &Ranked, b: &Ranked) -> Ordering {
    OrderedFloat(b.score)
        .cmp(&OrderedFloat(a.score))
        .then(a.position.cmp(&b.position))
}

/// Rank candidates by cosine similarity to `query`
///
/// Returns `min(k, candidates.len())` entries. Read-only on its inputs.
pub fn rank(query: &FeatureVector, candidates: &[FeatureVector], k: usize) -> Vec<Ranked> {
    let scored = candidates
        .iter()
        .enumerate()
        .map(|(position, candidate)| Ranked {
            position,
            score: query.cosine_similarity(candidate),
        })
        .collect();
    top_k(scored, k)
}

/// Rank with candidates split into shards of `shard_size` scored in parallel
///
/// Each shard keeps its own top `k`; the merge applies the same ordering
/// as [`rank`], so both functions return identical results.
pub fn rank_sharded(
    query: &FeatureVector,
    candidates: &[FeatureVector],
    k: usize,
    shard_size: usize,
) -> Vec<Ranked> {
    if k == 0 || candidates.is_empty() {
        return Vec::new();
    }
    let shard_size = shard_size.max(1);

    let partials: Vec<Vec<Ranked>> = candidates
        .par_chunks(shard_size)
        .enumerate()
        .map(|(shard, chunk)| {
            let base = shard * shard_size;
            let scored = chunk
                .iter()
                .enumerate()
                .map(|(i, candidate)| Ranked {
                    position: base + i,
                    score: query.cosine_similarity(candidate),
                })
                .collect();
            top_k(scored, k)
        })
        .collect();

    top_k(partials.into_iter().flatten().collect(), k)
}

fn top_k(mut scored: Vec<Ranked>, k: usize) -> Vec<Ranked> {
    if k < scored.len() {
        scored.select_nth_unstable_by(k, by_score_then_position);
        scored.truncate(k);
    }
    // Positions are unique, so the order is total and the unstable sort is deterministic
    scored.sort_unstable_by(by_score_then_position);
    scored
}
