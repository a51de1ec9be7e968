//! Admin Controller
//!
//! Owner-governed configuration plus the emergency gate. Operators hold
//! exactly one delegated power: emergency pause.

use yieldpool_common::{
    access_control::{self, Permission},
    emergency,
    errors::PoolResult,
    events::EventType,
    types::{validate_limits, validate_rate, Address, YieldSnapshot},
};

use crate::YieldPool;

impl YieldPool {
    /// Clock then authority, shared by every admin entry point
    fn check_admin_entry(&self, caller: &Address, permission: Permission, now: u64) -> PoolResult<()> {
        self.check_clock(now)?;
        access_control::require_permission(&self.access, caller, permission)?;
        Ok(())
    }

    // ============ Yield Rate ============

    /// Change the pool-wide rate. The previous rate is recorded in a
    /// yield snapshot; unsettled intervals accrue at the new rate.
    pub fn set_yield_rate(&mut self, caller: Address, rate_bps: u64, now: u64) -> PoolResult<u64> {
        self.check_admin_entry(&caller, Permission::SetYieldRate, now)?;
        validate_rate(rate_bps)?;

        let event_id = self.events.reserve()?;

        let previous = self.pool.yield_rate_bps;
        self.snapshots.push(YieldSnapshot {
            previous_rate_bps: previous,
            new_rate_bps: rate_bps,
            total_liquidity: self.pool.total_liquidity,
            block_height: now,
        });
        self.pool.yield_rate_bps = rate_bps;
        self.last_seen_height = now;
        self.events.append(event_id, EventType::YieldRate, caller, rate_bps, now);

        log::info!("yield rate {} -> {} bps at {}", previous, rate_bps, now);
        Ok(event_id)
    }

    // ============ Parameters ============

    /// Replace the deposit bounds. Existing positions above a lowered
    /// cap are left alone; only later deposits see the new limits.
    pub fn set_pool_parameters(
        &mut self,
        caller: Address,
        min_deposit: u64,
        max_deposit_per_user: u64,
        max_pool_size: u64,
        now: u64,
    ) -> PoolResult<u64> {
        self.check_admin_entry(&caller, Permission::SetPoolParameters, now)?;
        validate_limits(min_deposit, max_deposit_per_user, max_pool_size)?;

        let event_id = self.events.reserve()?;

        self.params.min_deposit = min_deposit;
        self.params.max_deposit_per_user = max_deposit_per_user;
        self.params.max_pool_size = max_pool_size;
        self.last_seen_height = now;
        self.events
            .append(event_id, EventType::ParamsUpdate, caller, max_pool_size, now);

        log::info!(
            "parameters: min={} per_user={} pool_cap={}",
            min_deposit,
            max_deposit_per_user,
            max_pool_size
        );
        Ok(event_id)
    }

    /// Open or close the pool to user operations
    pub fn set_pool_active(&mut self, caller: Address, active: bool, now: u64) -> PoolResult<u64> {
        self.check_admin_entry(&caller, Permission::SetPoolActive, now)?;

        let event_id = self.events.reserve()?;

        self.pool.pool_active = active;
        self.last_seen_height = now;
        self.events
            .append(event_id, EventType::PoolStatus, caller, u64::from(active), now);

        log::info!("pool active = {}", active);
        Ok(event_id)
    }

    // ============ Emergency ============

    /// Pause all user operations. Owner or operator.
    pub fn emergency_pause(&mut self, caller: Address, now: u64) -> PoolResult<u64> {
        self.check_admin_entry(&caller, Permission::EmergencyPause, now)?;
        emergency::check_pause(&self.security)?;

        let event_id = self.events.reserve()?;

        emergency::apply_pause(&mut self.security, now);
        self.last_seen_height = now;
        self.events.append(event_id, EventType::EmergencyPause, caller, 0, now);
        Ok(event_id)
    }

    /// Lift the pause once the cooldown has elapsed. Owner only.
    pub fn emergency_resume(&mut self, caller: Address, now: u64) -> PoolResult<u64> {
        self.check_admin_entry(&caller, Permission::EmergencyResume, now)?;
        emergency::check_resume(&self.security, self.params.cooldown_period, now)?;

        let event_id = self.events.reserve()?;

        emergency::apply_resume(&mut self.security, now);
        self.last_seen_height = now;
        self.events.append(event_id, EventType::EmergencyResume, caller, 0, now);
        Ok(event_id)
    }

    // ============ Operators ============

    pub fn add_operator(&mut self, caller: Address, operator: Address, now: u64) -> PoolResult<u64> {
        self.change_operator(caller, operator, true, now)
    }

    /// Revoke an operator. Revoking a non-operator still succeeds and
    /// still emits an event.
    pub fn remove_operator(&mut self, caller: Address, operator: Address, now: u64) -> PoolResult<u64> {
        self.change_operator(caller, operator, false, now)
    }

    /// Operator events carry the affected identity as their actor
    fn change_operator(&mut self, caller: Address, operator: Address, authorized: bool, now: u64) -> PoolResult<u64> {
        self.check_admin_entry(&caller, Permission::ManageOperators, now)?;

        let event_id = self.events.reserve()?;

        access_control::set_operator(&mut self.access, operator, authorized);
        self.last_seen_height = now;
        let event_type = if authorized {
            EventType::AddOperator
        } else {
            EventType::RemoveOperator
        };
        self.events.append(event_id, event_type, operator, 0, now);

        log::info!("operator {:02x?} authorized = {}", &operator[..4], authorized);
        Ok(event_id)
    }
}
