//! Configuration for a payment channel manager instance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{constants, Address, Result, VpayError};

/// Immutable parameters of one manager instance.
///
/// All three fields are fixed for the lifetime of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// The manager's own identity, bound into every payment message hash.
    pub address: Address,
    /// Co-signer required on every payment authorization.
    pub guardian: Address,
    /// Delay between a withdrawal request and the release of funds.
    #[serde(default = "default_lock_period")]
    pub deposit_withdrawal_lock_period: u64,
}

fn default_lock_period() -> u64 {
    constants::DEFAULT_LOCK_PERIOD_SECS
}

impl ManagerConfig {
    #[must_use]
    pub fn new(address: Address, guardian: Address, deposit_withdrawal_lock_period: u64) -> Self {
        Self {
            address,
            guardian,
            deposit_withdrawal_lock_period,
        }
    }

    /// Config with the default one-day lock period.
    #[must_use]
    pub fn with_default_lock_period(address: Address, guardian: Address) -> Self {
        Self::new(address, guardian, constants::DEFAULT_LOCK_PERIOD_SECS)
    }

    /// Reject configurations that could never authorize a payment or
    /// whose timelock would overflow.
    pub fn validate(&self) -> Result<()> {
        if self.address.is_zero() {
            return Err(VpayError::Configuration(
                "manager address must not be zero".into(),
            ));
        }
        if self.guardian.is_zero() {
            return Err(VpayError::Configuration("guardian must not be zero".into()));
        }
        if self.deposit_withdrawal_lock_period > constants::MAX_LOCK_PERIOD_SECS {
            return Err(VpayError::Configuration(format!(
                "lock period {}s exceeds maximum {}s",
                self.deposit_withdrawal_lock_period,
                constants::MAX_LOCK_PERIOD_SECS
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| VpayError::Configuration(format!("invalid manager config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}
