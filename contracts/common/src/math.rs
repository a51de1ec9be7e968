//! Yield Accrual Math
//!
//! Simple (non-compounding) yield on principal:
//!
//! ```text
//! yield = floor(principal * rate_bps * elapsed / (blocks_per_year * 10_000))
//! ```
//!
//! Division floors, so the pool never pays more than the exact rational
//! amount. The rounding remainder of each settlement is forfeited.

use crate::constants::rates::BPS_DENOMINATOR;
use crate::errors::{PoolError, PoolResult};

/// Calculate yield owed on `principal` for `elapsed` blocks at `rate_bps`.
///
/// # Arguments
/// * `principal` - Balance earning yield
/// * `elapsed` - Blocks since the last settlement
/// * `rate_bps` - Current annual rate in basis points
/// * `blocks_per_year` - Time units per year (must be non-zero)
///
/// # Returns
/// Yield in base units, or `Overflow` if the result does not fit in `u64`
pub fn compute_yield(
    principal: u64,
    elapsed: u64,
    rate_bps: u64,
    blocks_per_year: u64,
) -> PoolResult<u64> {
    if principal == 0 || elapsed == 0 || rate_bps == 0 {
        return Ok(0);
    }

    let numerator = (principal as u128)
        .checked_mul(rate_bps as u128)
        .and_then(|v| v.checked_mul(elapsed as u128))
        .ok_or(PoolError::Overflow)?;

    let denominator = (blocks_per_year as u128)
        .checked_mul(BPS_DENOMINATOR as u128)
        .filter(|d| *d > 0)
        .ok_or(PoolError::InvalidAmount {
            amount: blocks_per_year,
            reason: "blocks per year must be non-zero",
        })?;

    u64::try_from(numerator / denominator).map_err(|_| PoolError::Overflow)
}

/// Blocks elapsed since `last_settlement`; zero if `now` is not ahead of it
pub fn elapsed_blocks(last_settlement: u64, now: u64) -> u64 {
    now.saturating_sub(last_settlement)
}

/// Add with overflow reporting
pub fn checked_add(a: u64, b: u64) -> PoolResult<u64> {
    a.checked_add(b).ok_or(PoolError::Overflow)
}
