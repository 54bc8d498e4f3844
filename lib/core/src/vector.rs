use serde::{Deserialize, Serialize};

/// A fixed-layout feature vector
///
/// Produced by the encoder or the query projector against one fitted
/// state. Vectors from different fitted states are not comparable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        dot(&self.data, &self.data).sqrt()
    }

    /// True when every component is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Compute cosine similarity with another vector
    ///
    /// Zero-magnitude vectors, mismatched dimensions and non-finite
    /// components score 0. The result is clamped to `[-1, 1]` to absorb
    /// float rounding.
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let score = dot(&self.data, &other.data) / (norm_a * norm_b);
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(-1.0, 1.0)
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

/// Dot product with two accumulators over 8-wide chunks
fn dot(a: &[f32], b: &[f32]) -> f32 {
    let mut dot0 = 0.0f32;
    let mut dot1 = 0.0f32;

    let chunks = a.chunks_exact(8);
    let remainder = chunks.remainder();
    let b_chunks = b.chunks_exact(8);

    for (a_chunk, b_chunk) in chunks.zip(b_chunks) {
        dot0 += a_chunk[0] * b_chunk[0]
            + a_chunk[1] * b_chunk[1]
            + a_chunk[2] * b_chunk[2]
            + a_chunk[3] * b_chunk[3];
        dot1 += a_chunk[4] * b_chunk[4]
            + a_chunk[5] * b_chunk[5]
            + a_chunk[6] * b_chunk[6]
            + a_chunk[7] * b_chunk[7];
    }

    let tail = a.len() - remainder.len();
    for i in tail..a.len() {
        dot0 += a[i] * b[i];
    }

    dot0 + dot1
}
