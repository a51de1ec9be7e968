//! Position Ledger
//!
//! Deposit, withdraw and claim. Each settles pending yield into the
//! position before applying its own delta, and pairs every principal
//! change with the same change to `total_liquidity`.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use yieldpool_common::{
    errors::{PoolError, PoolResult},
    events::EventType,
    math::checked_add,
    types::{Address, Position},
};

use crate::YieldPool;

/// Outcome of a balance-changing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Receipt {
    /// Id of the event documenting the operation
    pub event_id: u64,
    /// Principal after the operation
    pub principal_amount: u64,
    /// Unclaimed yield after settlement
    pub accumulated_yield: u64,
    /// Pool liquidity after the operation
    pub total_liquidity: u64,
}

impl YieldPool {
    /// Settled copy of `identity`'s position at `now`, if it has one
    fn settled_position(&self, identity: &Address, now: u64) -> PoolResult<Option<Position>> {
        self.positions
            .get(identity)
            .map(|p| p.settled(now, self.pool.yield_rate_bps, self.params.blocks_per_year))
            .transpose()
    }

    /// Deposit `amount` for `caller`.
    ///
    /// Checks, in order: gate, minimum deposit, pool cap, then the
    /// per-user cap against the settled principal. Unclaimed yield does
    /// not count toward the per-user cap.
    pub fn deposit(&mut self, caller: Address, amount: u64, now: u64) -> PoolResult<Receipt> {
        self.check_user_entry(now)?;

        if amount < self.params.min_deposit {
            return Err(PoolError::BelowMinDeposit {
                amount,
                minimum: self.params.min_deposit,
            });
        }

        let new_total = self
            .pool
            .total_liquidity
            .checked_add(amount)
            .filter(|total| *total <= self.params.max_pool_size)
            .ok_or(PoolError::PoolFull {
                resulting: self.pool.total_liquidity.saturating_add(amount),
                maximum: self.params.max_pool_size,
            })?;

        let existing = self.settled_position(&caller, now)?;
        let current_principal = existing.as_ref().map_or(0, |p| p.principal_amount);

        let new_principal = current_principal
            .checked_add(amount)
            .filter(|principal| *principal <= self.params.max_deposit_per_user)
            .ok_or(PoolError::AboveMaxDeposit {
                resulting: current_principal.saturating_add(amount),
                maximum: self.params.max_deposit_per_user,
            })?;

        let is_new = existing.is_none();
        let position = match existing {
            Some(mut p) => {
                p.principal_amount = new_principal;
                p.lifetime_deposits = checked_add(p.lifetime_deposits, amount)?;
                p.last_action_height = now;
                p
            }
            None => Position::open(amount, now),
        };
        let depositor_count = if is_new {
            checked_add(self.pool.depositor_count, 1)?
        } else {
            self.pool.depositor_count
        };

        let event_id = self.events.reserve()?;

        // ---- writes ----
        let receipt = Receipt {
            event_id,
            principal_amount: position.principal_amount,
            accumulated_yield: position.accumulated_yield,
            total_liquidity: new_total,
        };
        self.positions.insert(caller, position);
        self.pool.total_liquidity = new_total;
        self.pool.depositor_count = depositor_count;
        self.last_seen_height = now;
        self.events.append(event_id, EventType::Deposit, caller, amount, now);

        log::info!(
            "deposit {:02x?}: +{} principal={} pool={}",
            &caller[..4],
            amount,
            receipt.principal_amount,
            new_total
        );
        Ok(receipt)
    }

    /// Withdraw `amount` of principal. All-or-nothing: no partial fills.
    pub fn withdraw(&mut self, caller: Address, amount: u64, now: u64) -> PoolResult<Receipt> {
        self.check_user_entry(now)?;

        let current = self
            .positions
            .get(&caller)
            .ok_or(PoolError::NotFound { depositor: caller })?;

        if amount > current.principal_amount {
            return Err(PoolError::InsufficientBalance {
                available: current.principal_amount,
                requested: amount,
            });
        }

        let mut position = current.settled(now, self.pool.yield_rate_bps, self.params.blocks_per_year)?;
        position.principal_amount -= amount;
        position.lifetime_withdrawals = checked_add(position.lifetime_withdrawals, amount)?;
        position.last_action_height = now;

        // total >= principal >= amount while the liquidity invariant holds
        let new_total = self
            .pool
            .total_liquidity
            .checked_sub(amount)
            .ok_or(PoolError::Overflow)?;

        let event_id = self.events.reserve()?;

        // ---- writes ----
        let receipt = Receipt {
            event_id,
            principal_amount: position.principal_amount,
            accumulated_yield: position.accumulated_yield,
            total_liquidity: new_total,
        };
        self.positions.insert(caller, position);
        self.pool.total_liquidity = new_total;
        self.last_seen_height = now;
        self.events.append(event_id, EventType::Withdraw, caller, amount, now);

        log::info!(
            "withdraw {:02x?}: -{} principal={} pool={}",
            &caller[..4],
            amount,
            receipt.principal_amount,
            new_total
        );
        Ok(receipt)
    }

    /// Settle and pay out all accumulated yield. Returns the amount
    /// claimed, which may be zero.
    pub fn claim_yield(&mut self, caller: Address, now: u64) -> PoolResult<u64> {
        self.check_user_entry(now)?;

        let mut position = self
            .settled_position(&caller, now)?
            .ok_or(PoolError::NotFound { depositor: caller })?;

        let claimed = position.accumulated_yield;
        let new_paid = checked_add(self.pool.total_yield_paid, claimed)?;
        position.accumulated_yield = 0;
        position.last_action_height = now;

        let event_id = self.events.reserve()?;

        // ---- writes ----
        self.positions.insert(caller, position);
        self.pool.total_yield_paid = new_paid;
        self.last_seen_height = now;
        self.events.append(event_id, EventType::Claim, caller, claimed, now);

        log::info!("claim {:02x?}: {} (total paid {})", &caller[..4], claimed, new_paid);
        Ok(claimed)
    }
}
