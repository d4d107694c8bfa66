//! Weighted pool deployment configuration.

use crate::{
    fixed_point::Bfp,
    time::MONTH,
    vault::{RawVaultConfig, VaultConfig},
    weights::to_normalized_weights,
};
use anyhow::Result;
use model::Account;
use primitive_types::H160;

/// Raw weighted pool parameters as provided by callers.
#[derive(Clone, Debug, Default)]
pub struct RawWeightedPoolConfig {
    pub tokens: Option<Vec<H160>>,
    pub weights: Option<Vec<Bfp>>,
    pub swap_fee_percentage: Option<Bfp>,
    pub pause_window_duration: Option<u64>,
    pub buffer_period_duration: Option<u64>,
    pub owner: Option<H160>,
    pub from: Option<Account>,
    /// The factory the pool should be created through. When set, the pool is
    /// deployed against a real vault instead of a mocked one.
    pub from_factory: Option<H160>,
}

/// A fully specified weighted pool deployment.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedPoolConfig {
    pub tokens: Vec<H160>,
    pub weights: Vec<Bfp>,
    pub swap_fee_percentage: Bfp,
    pub pause_window_duration: u64,
    pub buffer_period_duration: u64,
    pub owner: H160,
}

impl RawWeightedPoolConfig {
    /// Fills in defaults and normalizes the weight list so it sums to exactly
    /// 1.0 in fixed point units. Omitted weights default to one equal weight
    /// per token; supplied weights are re-normalized as well.
    pub fn normalize(self) -> Result<WeightedPoolConfig> {
        let tokens = self.tokens.unwrap_or_default();
        let weights = self
            .weights
            .unwrap_or_else(|| vec![Bfp::one(); tokens.len()]);
        Ok(WeightedPoolConfig {
            weights: to_normalized_weights(&weights)?,
            tokens,
            swap_fee_percentage: self.swap_fee_percentage.unwrap_or_else(Bfp::zero),
            pause_window_duration: self.pause_window_duration.unwrap_or(3 * MONTH),
            buffer_period_duration: self.buffer_period_duration.unwrap_or(MONTH),
            owner: self.owner.unwrap_or_default(),
        })
    }

    /// Derives the configuration of the vault the pool gets deployed against.
    /// The vault is mocked unless the pool is created through a factory.
    pub fn vault_config(&self) -> VaultConfig {
        RawVaultConfig {
            mocked: Some(self.from_factory.is_none()),
            admin: None,
            from: self.from.clone(),
            pause_window_duration: self.pause_window_duration,
            buffer_period_duration: self.buffer_period_duration,
        }
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults() {
        let config = RawWeightedPoolConfig::default().normalize().unwrap();
        assert_eq!(
            config,
            WeightedPoolConfig {
                tokens: vec![],
                weights: vec![],
                swap_fee_percentage: Bfp::zero(),
                pause_window_duration: 3 * MONTH,
                buffer_period_duration: MONTH,
                owner: H160::zero(),
            }
        );
    }

    #[test]
    fn omitted_weights_become_equal_weights() {
        let config = RawWeightedPoolConfig {
            tokens: Some(vec![H160([1; 20]), H160([2; 20]), H160([3; 20]), H160([4; 20])]),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(config.weights, vec![bfp!("0.25"); 4]);
    }

    #[test]
    fn supplied_weights_are_renormalized() {
        let config = RawWeightedPoolConfig {
            tokens: Some(vec![H160([1; 20]), H160([2; 20])]),
            weights: Some(vec![bfp!("8"), bfp!("2")]),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(config.weights, vec![bfp!("0.8"), bfp!("0.2")]);
    }

    #[test]
    fn vault_is_mocked_without_a_factory() {
        let raw = RawWeightedPoolConfig::default();
        assert!(raw.vault_config().mocked);

        let raw = RawWeightedPoolConfig {
            from_factory: Some(H160([0xfa; 20])),
            ..Default::default()
        };
        assert!(!raw.vault_config().mocked);
    }

    #[test]
    fn vault_admin_defaults_to_the_pool_sender() {
        let sender = Account::Address(H160([0xab; 20]));
        let raw = RawWeightedPoolConfig {
            from: Some(sender.clone()),
            ..Default::default()
        };
        assert_eq!(raw.vault_config().admin, sender);
    }
}
