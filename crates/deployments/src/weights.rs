//! Normalization of pool weight lists.

use crate::fixed_point::Bfp;
use anyhow::{ensure, Context as _, Result};
use primitive_types::U256;

/// Scales the given weights so that they sum to exactly 1.0 in fixed point
/// units. All entries but the last are scaled by `1e18 / sum` rounding down;
/// the last entry absorbs the rounding remainder so that the invariant holds
/// exactly.
pub fn to_normalized_weights(weights: &[Bfp]) -> Result<Vec<Bfp>> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }

    let mut sum = U256::zero();
    for weight in weights {
        sum = sum
            .checked_add(weight.as_uint256())
            .context("total weight overflow")?;
    }
    ensure!(!sum.is_zero(), "cannot normalize zero total weight");

    let one = Bfp::one().as_uint256();
    let mut normalized = Vec::with_capacity(weights.len());
    let mut normalized_sum = U256::zero();
    for (index, weight) in weights.iter().enumerate() {
        let weight = if index < weights.len() - 1 {
            let weight = weight
                .as_uint256()
                .checked_mul(one)
                .context("weight overflow")?
                / sum;
            normalized_sum += weight;
            weight
        } else {
            one - normalized_sum
        };
        normalized.push(Bfp::from_wei(weight));
    }
    Ok(normalized)
}
