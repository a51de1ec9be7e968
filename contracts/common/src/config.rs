//! Genesis Configuration
//!
//! Parameters the pool starts with. Defaults come from [`crate::constants`]
//! (network selected by the `mainnet` feature); deployments may override
//! any of them from a TOML document:
//!
//! ```toml
//! min_deposit = 1000000
//! max_deposit_per_user = 10000000000
//! max_pool_size = 1000000000000
//! yield_rate_bps = 500
//! cooldown_period = 144
//! blocks_per_year = 52560
//! pool_active = true
//! ```
//!
//! The owner is not part of the document: it is the deploying caller,
//! supplied by the host at genesis.

use serde::{Deserialize, Serialize};

use crate::constants::{limits, rates, time};
use crate::errors::{PoolError, PoolResult};
use crate::types::{validate_limits, validate_rate, PoolParameters};

/// Pool configuration at genesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenesisConfig {
    pub min_deposit: u64,
    pub max_deposit_per_user: u64,
    pub max_pool_size: u64,
    /// Initial annual yield rate (basis points)
    pub yield_rate_bps: u64,
    pub cooldown_period: u64,
    pub blocks_per_year: u64,
    /// Whether the pool accepts user operations from genesis
    pub pool_active: bool,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            min_deposit: limits::DEFAULT_MIN_DEPOSIT,
            max_deposit_per_user: limits::DEFAULT_MAX_DEPOSIT_PER_USER,
            max_pool_size: limits::DEFAULT_MAX_POOL_SIZE,
            yield_rate_bps: rates::DEFAULT_YIELD_RATE_BPS,
            cooldown_period: time::DEFAULT_COOLDOWN_PERIOD,
            blocks_per_year: time::BLOCKS_PER_YEAR,
            pool_active: true,
        }
    }
}

impl GenesisConfig {
    /// Parse and validate a TOML document; omitted keys keep defaults
    pub fn from_toml_str(source: &str) -> PoolResult<Self> {
        let config: GenesisConfig = toml::from_str(source).map_err(|e| PoolError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> PoolResult<String> {
        toml::to_string_pretty(self).map_err(|e| PoolError::Config {
            reason: e.to_string(),
        })
    }

    /// Check every bound a running pool would enforce
    pub fn validate(&self) -> PoolResult<()> {
        validate_limits(self.min_deposit, self.max_deposit_per_user, self.max_pool_size)?;
        validate_rate(self.yield_rate_bps)?;
        if self.blocks_per_year == 0 {
            return Err(PoolError::Config {
                reason: "blocks_per_year must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Parameter store contents implied by this config
    pub fn parameters(&self) -> PoolParameters {
        PoolParameters {
            min_deposit: self.min_deposit,
            max_deposit_per_user: self.max_deposit_per_user,
            max_pool_size: self.max_pool_size,
            cooldown_period: self.cooldown_period,
            blocks_per_year: self.blocks_per_year,
        }
    }
}
