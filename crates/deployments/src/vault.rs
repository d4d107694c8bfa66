//! Vault deployment configuration.

use model::Account;

/// Raw vault parameters as provided by callers.
#[derive(Clone, Debug, Default)]
pub struct RawVaultConfig {
    pub mocked: Option<bool>,
    pub admin: Option<Account>,
    pub from: Option<Account>,
    pub pause_window_duration: Option<u64>,
    pub buffer_period_duration: Option<u64>,
}

/// A fully specified vault deployment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VaultConfig {
    pub mocked: bool,
    pub admin: Account,
    pub pause_window_duration: u64,
    pub buffer_period_duration: u64,
}

impl RawVaultConfig {
    /// Fills in defaults: a real (non-mocked) vault, administered by the
    /// sender, with no pause window or buffer period.
    pub fn normalize(self) -> VaultConfig {
        VaultConfig {
            mocked: self.mocked.unwrap_or(false),
            admin: self.admin.or(self.from).unwrap_or_default(),
            pause_window_duration: self.pause_window_duration.unwrap_or(0),
            buffer_period_duration: self.buffer_period_duration.unwrap_or(0),
        }
    }
}
