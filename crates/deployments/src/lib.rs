//! Normalization of raw deployment parameters.
//!
//! Test and tooling callers describe vaults, pools and token batches with
//! loosely shaped inputs where most fields are optional and some accept a
//! single value or a list. The normalizers in this crate expand those inputs
//! into fully specified configuration records with documented defaults. They
//! are pure: nothing here talks to a node or deploys anything.

#[macro_use]
pub mod fixed_point;

pub mod stable;
pub mod time;
pub mod tokens;
pub mod vault;
pub mod weighted;
pub mod weights;

pub use fixed_point::Bfp;
pub use stable::{RawStablePoolConfig, StablePoolConfig};
pub use tokens::{
    normalize_token_approvals, normalize_token_deployment, normalize_token_deployments,
    normalize_token_mints, OneOrMany, RawTokenApproval, RawTokenDeployment, RawTokenMint,
    RawTokensDeployment, TokenApproval, TokenDeployment, TokenMint,
};
pub use vault::{RawVaultConfig, VaultConfig};
pub use weighted::{RawWeightedPoolConfig, WeightedPoolConfig};
