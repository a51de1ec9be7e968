//! Protocol Constants
//!
//! Genesis defaults and hard bounds for the yield pool.
//!
//! # Network Configuration
//!
//! Use feature flags to compile for different networks:
//! - `mainnet` - Production values (higher minimums and caps)
//! - Default (no feature) - Testnet values (small amounts for testing)
//!
//! ```toml
//! # For mainnet deployment:
//! yieldpool-common = { path = "...", features = ["mainnet"] }
//! ```

/// Unit metadata
pub mod unit {
    /// One unit with decimals (1 unit = 1_000_000 base units)
    pub const ONE: u64 = 1_000_000;
}

/// Rate Configuration (in basis points, 100 = 1%)
pub mod rates {
    /// Basis points denominator (10,000 bps = 100%)
    pub const BPS_DENOMINATOR: u64 = 10_000;

    /// Highest yield rate the admin may set (100% APR)
    pub const MAX_YIELD_RATE_BPS: u64 = 10_000;

    /// Yield rate at genesis (5% APR)
    pub const DEFAULT_YIELD_RATE_BPS: u64 = 500;
}

/// Time-related constants
pub mod time {
    /// Blocks per day (assuming 10 min blocks)
    pub const BLOCKS_PER_DAY: u64 = 144;

    /// Blocks per year (~10 min blocks): 52,560
    pub const BLOCKS_PER_YEAR: u64 = 52_560;

    /// Minimum blocks between an emergency pause and the following resume
    /// - Mainnet: 1 day
    /// - Testnet: 1 hour
    #[cfg(feature = "mainnet")]
    pub const DEFAULT_COOLDOWN_PERIOD: u64 = BLOCKS_PER_DAY;
    #[cfg(not(feature = "mainnet"))]
    pub const DEFAULT_COOLDOWN_PERIOD: u64 = 6;
}

/// Deposit Limits
///
/// Values differ between mainnet and testnet to allow easier testing.
pub mod limits {
    use super::unit::ONE;

    /// Minimum single deposit
    /// - Mainnet: 100 units
    /// - Testnet: 1 unit
    #[cfg(feature = "mainnet")]
    pub const DEFAULT_MIN_DEPOSIT: u64 = 100 * ONE;
    #[cfg(not(feature = "mainnet"))]
    pub const DEFAULT_MIN_DEPOSIT: u64 = ONE;

    /// Maximum principal a single depositor may hold
    #[cfg(feature = "mainnet")]
    pub const DEFAULT_MAX_DEPOSIT_PER_USER: u64 = 1_000_000 * ONE;
    #[cfg(not(feature = "mainnet"))]
    pub const DEFAULT_MAX_DEPOSIT_PER_USER: u64 = 10_000 * ONE;

    /// Maximum total liquidity held by the pool
    #[cfg(feature = "mainnet")]
    pub const DEFAULT_MAX_POOL_SIZE: u64 = 100_000_000 * ONE;
    #[cfg(not(feature = "mainnet"))]
    pub const DEFAULT_MAX_POOL_SIZE: u64 = 1_000_000 * ONE;
}
