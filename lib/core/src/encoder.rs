//! Feature vector assembly
//!
//! Lays out a record (or a projected query) against a fitted state:
//! one multi-hot block per categorical field, then one scalar per numeric
//! field, all in schema order.

use crate::error::{Result, SchemaError};
use crate::normalizer::NumericBounds;
use crate::record::CandidateRecord;
use crate::state::FittedState;
use crate::tokenizer::tokenize;
use crate::vector::FeatureVector;
use crate::vocabulary::Vocabulary;

/// Encode a record against a fitted state
///
/// Tokens unknown to a vocabulary are dropped. Missing numeric values
/// encode as 0; values that are present but not numeric are a schema error.
pub fn encode(record: &CandidateRecord, state: &FittedState) -> Result<FeatureVector> {
    assemble(
        state,
        |vocab, block| {
            for token in tokenize(record.field(vocab.field())) {
                if let Some(i) = vocab.index_of(&token) {
                    block[i] = 1.0;
                }
            }
        },
        |bounds| -> Result<f32> {
            let value = record
                .field(&bounds.field)
                .as_number()
                .map_err(|rendered| SchemaError::NonNumeric {
                    field: bounds.field.clone(),
                    value: rendered,
                })?;
            Ok(value.map(|v| bounds.normalize(v) as f32).unwrap_or(0.0))
        },
    )
}

/// Build a vector of `state.dim()` components
///
/// `fill_block` receives each vocabulary with its zeroed block (exactly
/// `vocab.len()` long); `numeric` yields the scalar for each bounds entry.
pub(crate) fn assemble<B, N, E>(
    state: &FittedState,
    mut fill_block: B,
    mut numeric: N,
) -> std::result::Result<FeatureVector, E>
where
    B: FnMut(&Vocabulary, &mut [f32]),
    N: FnMut(&NumericBounds) -> std::result::Result<f32, E>,
{
    let mut data = vec![0.0f32; state.dim()];

    let mut offset = 0;
    for vocab in state.vocabularies() {
        let end = offset + vocab.len();
        fill_block(vocab, &mut data[offset..end]);
        offset = end;
    }

    for (slot, bounds) in data[offset..].iter_mut().zip(state.bounds()) {
        *slot = numeric(bounds)?;
    }

    Ok(FeatureVector::new(data))
}
