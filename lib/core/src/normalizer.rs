//! Min/max normalization for numeric fields

use crate::error::SchemaError;
use crate::tokenizer::FieldValue;
use serde::{Deserialize, Serialize};

/// Observed range of one numeric field in the fit corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    pub field: String,
    pub min: f64,
    pub max: f64,
    /// Number of non-missing values the bounds were fitted on
    pub observed: usize,
}

impl NumericBounds {
    /// Fit bounds over every value of `field`
    ///
    /// Missing values are skipped. Any value that cannot be coerced to a
    /// number fails the whole fit. A field with no values at all gets
    /// degenerate `(0, 0)` bounds.
    pub fn fit<'a, I>(field: impl Into<String>, values: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'a FieldValue>,
    {
        let field = field.into();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut observed = 0;

        for value in values {
            let number = value.as_number().map_err(|rendered| SchemaError::NonNumeric {
                field: field.clone(),
                value: rendered,
            })?;
            if let Some(n) = number {
                min = min.min(n);
                max = max.max(n);
                observed += 1;
            }
        }

        if observed == 0 {
            min = 0.0;
            max = 0.0;
        }

        Ok(Self { field, min, max, observed })
    }

    /// Zero-variance range: every input normalizes to 0
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Rescale `value` linearly so that `min -> 0` and `max -> 1`
    ///
    /// Values outside the fitted range map outside `[0, 1]`.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (value - self.min) / (self.max - self.min)
    }
}
