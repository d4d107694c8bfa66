//! Stable pool deployment configuration.

use crate::{fixed_point::Bfp, time::MONTH};
use model::Account;
use primitive_types::{H160, U256};

/// Raw stable pool parameters as provided by callers.
#[derive(Clone, Debug, Default)]
pub struct RawStablePoolConfig {
    pub tokens: Option<Vec<H160>>,
    pub amplification_parameter: Option<U256>,
    pub swap_fee_percentage: Option<Bfp>,
    pub pause_window_duration: Option<u64>,
    pub buffer_period_duration: Option<u64>,
    pub owner: Option<H160>,
    pub from: Option<Account>,
}

/// A fully specified stable pool deployment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StablePoolConfig {
    pub tokens: Vec<H160>,
    pub amplification_parameter: U256,
    pub swap_fee_percentage: Bfp,
    pub pause_window_duration: u64,
    pub buffer_period_duration: u64,
    pub owner: H160,
}

impl RawStablePoolConfig {
    /// Fills in defaults. The amplification parameter defaults to 200 scaled
    /// to 18 decimals, matching the units the historical deployments used.
    pub fn normalize(self) -> StablePoolConfig {
        StablePoolConfig {
            tokens: self.tokens.unwrap_or_default(),
            amplification_parameter: self
                .amplification_parameter
                .unwrap_or_else(|| U256::from(200) * U256::exp10(18)),
            swap_fee_percentage: self.swap_fee_percentage.unwrap_or_else(Bfp::zero),
            pause_window_duration: self.pause_window_duration.unwrap_or(3 * MONTH),
            buffer_period_duration: self.buffer_period_duration.unwrap_or(MONTH),
            owner: self.owner.unwrap_or_default(),
        }
    }
}
