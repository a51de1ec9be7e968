//! Core Types for the Yield Pool
//!
//! Records held by the ledger: per-depositor positions, the pool
//! singleton, its bounded parameters and the yield-rate history.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::{limits, rates, time};
use crate::errors::{PoolError, PoolResult};
use crate::math::{checked_add, compute_yield, elapsed_blocks};

/// Type alias for identities (32-byte hash)
pub type Address = [u8; 32];

// ============ Position ============

/// A depositor's ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Position {
    /// Withdrawable balance
    pub principal_amount: u64,
    /// Height at which yield was last settled into `accumulated_yield`
    pub last_settlement_height: u64,
    /// Yield owed but not yet claimed
    pub accumulated_yield: u64,
    /// Height of the most recent operation on this position
    pub last_action_height: u64,
    /// Sum of all deposits ever made
    pub lifetime_deposits: u64,
    /// Sum of all withdrawals ever made
    pub lifetime_withdrawals: u64,
}

impl Position {
    /// Opens a position with its first deposit
    pub fn open(amount: u64, block_height: u64) -> Self {
        Self {
            principal_amount: amount,
            last_settlement_height: block_height,
            accumulated_yield: 0,
            last_action_height: block_height,
            lifetime_deposits: amount,
            lifetime_withdrawals: 0,
        }
    }

    /// Yield accrued since the last settlement, at the current rate
    pub fn pending_yield(&self, now: u64, rate_bps: u64, blocks_per_year: u64) -> PoolResult<u64> {
        compute_yield(
            self.principal_amount,
            elapsed_blocks(self.last_settlement_height, now),
            rate_bps,
            blocks_per_year,
        )
    }

    /// Returns this position with pending yield folded into
    /// `accumulated_yield` and the settlement height advanced to `now`.
    ///
    /// Pure: the caller decides whether to commit the result.
    pub fn settled(&self, now: u64, rate_bps: u64, blocks_per_year: u64) -> PoolResult<Self> {
        let pending = self.pending_yield(now, rate_bps, blocks_per_year)?;
        let mut next = self.clone();
        next.accumulated_yield = checked_add(self.accumulated_yield, pending)?;
        next.last_settlement_height = now;
        Ok(next)
    }
}

// ============ Pool State ============

/// Global pool state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolState {
    /// Sum of every position's principal
    pub total_liquidity: u64,
    /// Administrative gate for user operations
    pub pool_active: bool,
    /// Current annual yield rate (basis points)
    pub yield_rate_bps: u64,
    /// Cumulative yield claimed
    pub total_yield_paid: u64,
    /// Number of positions ever opened
    pub depositor_count: u64,
}

impl PoolState {
    /// Creates the genesis pool state
    pub fn new(yield_rate_bps: u64) -> Self {
        Self {
            total_liquidity: 0,
            pool_active: true,
            yield_rate_bps,
            total_yield_paid: 0,
            depositor_count: 0,
        }
    }
}

impl Default for PoolState {
    fn default() -> Self {
        Self::new(rates::DEFAULT_YIELD_RATE_BPS)
    }
}

// ============ Parameters ============

/// Bounded pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolParameters {
    /// Smallest accepted single deposit
    pub min_deposit: u64,
    /// Largest principal one depositor may hold
    pub max_deposit_per_user: u64,
    /// Largest total liquidity the pool may hold
    pub max_pool_size: u64,
    /// Blocks that must pass between pause and resume
    pub cooldown_period: u64,
    /// Time units per year used by the accrual formula
    pub blocks_per_year: u64,
}

impl Default for PoolParameters {
    fn default() -> Self {
        Self {
            min_deposit: limits::DEFAULT_MIN_DEPOSIT,
            max_deposit_per_user: limits::DEFAULT_MAX_DEPOSIT_PER_USER,
            max_pool_size: limits::DEFAULT_MAX_POOL_SIZE,
            cooldown_period: time::DEFAULT_COOLDOWN_PERIOD,
            blocks_per_year: time::BLOCKS_PER_YEAR,
        }
    }
}

/// Check `min_deposit <= max_deposit_per_user <= max_pool_size`
pub fn validate_limits(min_deposit: u64, max_deposit_per_user: u64, max_pool_size: u64) -> PoolResult<()> {
    if min_deposit > max_deposit_per_user {
        return Err(PoolError::InvalidAmount {
            amount: min_deposit,
            reason: "min deposit exceeds per-user cap",
        });
    }
    if max_deposit_per_user > max_pool_size {
        return Err(PoolError::InvalidAmount {
            amount: max_deposit_per_user,
            reason: "per-user cap exceeds pool cap",
        });
    }
    Ok(())
}

/// Check a yield rate against the 0..=10000 bps bound
pub fn validate_rate(rate_bps: u64) -> PoolResult<()> {
    if rate_bps > rates::MAX_YIELD_RATE_BPS {
        return Err(PoolError::InvalidAmount {
            amount: rate_bps,
            reason: "yield rate above 10000 bps",
        });
    }
    Ok(())
}

// ============ Yield History ============

/// Immutable record of a yield-rate change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct YieldSnapshot {
    /// Rate in force before the change
    pub previous_rate_bps: u64,
    /// Rate in force after the change
    pub new_rate_bps: u64,
    /// Pool liquidity at the moment of change
    pub total_liquidity: u64,
    /// Height of the change
    pub block_height: u64,
}

// ============ Read Models ============

/// Aggregate pool view returned by `get_pool_stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub total_liquidity: u64,
    pub total_yield_paid: u64,
    pub yield_rate_bps: u64,
    pub pool_active: bool,
    pub emergency_paused: bool,
    pub depositor_count: u64,
    pub min_deposit: u64,
    pub max_deposit_per_user: u64,
    pub max_pool_size: u64,
    /// Remaining capacity before the pool cap
    pub available_capacity: u64,
    pub event_count: u64,
    pub snapshot_count: u64,
}
