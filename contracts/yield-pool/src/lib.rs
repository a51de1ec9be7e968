//! Yield Pool Ledger
//!
//! Single-pool accounting engine: depositors hold positions that accrue
//! simple yield at one pool-wide rate, subject to deposit bounds, a pool
//! cap and a pause/cooldown security gate.
//!
//! ## Execution Model
//!
//! The host supplies the caller identity and a monotonic block height to
//! every operation and applies operations one at a time. Each operation
//! here takes `&mut YieldPool`, validates everything it needs, reserves
//! its event id, and only then writes. A returned error therefore always
//! leaves the ledger untouched, with or without host rollback.
//!
//! ```text
//! user op:  clock -> gate -> validate -> settle -> reserve event -> write -> append event
//! admin op: clock -> authority -> validate -> reserve event -> write -> append event
//! ```

use std::collections::BTreeMap;

use yieldpool_common::{
    access_control::AccessControlState,
    config::GenesisConfig,
    emergency::{self, SecurityState},
    errors::{PoolError, PoolResult},
    events::{EventLog, PoolEvent},
    storage::{self, namespace, StateDigest},
    types::{Address, PoolParameters, PoolState, PoolStats, Position, YieldSnapshot},
};

mod admin;
mod ledger;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod scenarios;

pub use ledger::Receipt;

// ============ Ledger State ============

/// The whole ledger: parameter store, position map, singletons, history
#[derive(Debug, Clone)]
pub struct YieldPool {
    params: PoolParameters,
    pool: PoolState,
    security: SecurityState,
    access: AccessControlState,
    positions: BTreeMap<Address, Position>,
    snapshots: Vec<YieldSnapshot>,
    events: EventLog,
    /// Highest height any successful operation has run at
    last_seen_height: u64,
}

impl YieldPool {
    /// Create the pool at genesis, owned by `owner`
    pub fn genesis(owner: Address, config: &GenesisConfig) -> PoolResult<Self> {
        config.validate()?;

        let mut pool = PoolState::new(config.yield_rate_bps);
        pool.pool_active = config.pool_active;

        log::info!(
            "genesis: rate={}bps min={} per_user={} pool_cap={} cooldown={}",
            config.yield_rate_bps,
            config.min_deposit,
            config.max_deposit_per_user,
            config.max_pool_size,
            config.cooldown_period
        );

        Ok(Self {
            params: config.parameters(),
            pool,
            security: SecurityState::new(),
            access: AccessControlState::new(owner),
            positions: BTreeMap::new(),
            snapshots: Vec::new(),
            events: EventLog::new(),
            last_seen_height: 0,
        })
    }

    /// Replace the event log, e.g. with a bounded one. Only allowed
    /// before the first event; ids must never restart.
    pub fn with_event_log(mut self, events: EventLog) -> PoolResult<Self> {
        if !self.events.is_empty() {
            return Err(PoolError::Config {
                reason: format!("event log replaced after {} events", self.events.len()),
            });
        }
        self.events = events;
        Ok(self)
    }

    // ============ Shared Checks ============

    /// Reject heights below one already processed
    fn check_clock(&self, now: u64) -> PoolResult<()> {
        if now < self.last_seen_height {
            return Err(PoolError::ClockRegression {
                last_seen: self.last_seen_height,
                current: now,
            });
        }
        Ok(())
    }

    /// Clock and security gate, in that order
    fn check_user_entry(&self, now: u64) -> PoolResult<()> {
        self.check_clock(now)?;
        emergency::check_gate(self.pool.pool_active, &self.security)
    }

    // ============ Read-only Queries ============

    /// Position for `identity`; `None` means it never deposited
    pub fn get_user_position(&self, identity: &Address) -> Option<&Position> {
        self.positions.get(identity)
    }

    /// Aggregate pool view
    pub fn get_pool_stats(&self) -> PoolStats {
        PoolStats {
            total_liquidity: self.pool.total_liquidity,
            total_yield_paid: self.pool.total_yield_paid,
            yield_rate_bps: self.pool.yield_rate_bps,
            pool_active: self.pool.pool_active,
            emergency_paused: self.security.emergency_paused,
            depositor_count: self.pool.depositor_count,
            min_deposit: self.params.min_deposit,
            max_deposit_per_user: self.params.max_deposit_per_user,
            max_pool_size: self.params.max_pool_size,
            available_capacity: self.params.max_pool_size.saturating_sub(self.pool.total_liquidity),
            event_count: self.events.len(),
            snapshot_count: self.snapshot_count(),
        }
    }

    /// Event by id
    pub fn get_event(&self, id: u64) -> Option<&PoolEvent> {
        self.events.get(id)
    }

    /// Number of events emitted so far
    pub fn event_count(&self) -> u64 {
        self.events.len()
    }

    /// Full event log
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Yield snapshot by sequence number
    pub fn get_yield_snapshot(&self, seq: u64) -> Option<&YieldSnapshot> {
        usize::try_from(seq).ok().and_then(|i| self.snapshots.get(i))
    }

    /// Number of yield-rate changes recorded
    pub fn snapshot_count(&self) -> u64 {
        self.snapshots.len() as u64
    }

    /// Whether `identity` is an authorized operator
    pub fn is_operator(&self, identity: &Address) -> bool {
        self.access.is_operator(identity)
    }

    /// The genesis owner
    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn parameters(&self) -> &PoolParameters {
        &self.params
    }

    pub fn pool_state(&self) -> &PoolState {
        &self.pool
    }

    pub fn security_state(&self) -> &SecurityState {
        &self.security
    }

    /// Blocks left before an emergency resume is allowed at `now`
    pub fn cooldown_remaining(&self, now: u64) -> u64 {
        emergency::cooldown_remaining(&self.security, self.params.cooldown_period, now)
    }

    /// Claimable yield `identity` would have if settled at `now`.
    /// `None` if the identity never deposited.
    pub fn preview_pending_yield(&self, identity: &Address, now: u64) -> PoolResult<Option<u64>> {
        self.positions
            .get(identity)
            .map(|p| {
                p.settled(now, self.pool.yield_rate_bps, self.params.blocks_per_year)
                    .map(|s| s.accumulated_yield)
            })
            .transpose()
    }

    /// All positions in identity order
    pub fn positions(&self) -> impl Iterator<Item = (&Address, &Position)> {
        self.positions.iter()
    }

    // ============ Persistence ============

    /// Every record as `(key, borsh value)` in key order
    pub fn records(&self) -> PoolResult<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut out = Vec::with_capacity(
            4 + self.positions.len() + self.access.operators().len() + self.snapshots.len() + self.events.events().len(),
        );

        out.push((storage::singleton_key(namespace::POOL_STATE), storage::encode(&self.pool)?));
        out.push((storage::singleton_key(namespace::SECURITY_STATE), storage::encode(&self.security)?));
        out.push((storage::singleton_key(namespace::PARAMETERS), storage::encode(&self.params)?));
        out.push((storage::singleton_key(namespace::CLOCK), storage::encode(&self.last_seen_height)?));

        for (identity, position) in &self.positions {
            out.push((storage::identity_key(namespace::POSITION, identity), storage::encode(position)?));
        }
        for (identity, authorized) in self.access.operators() {
            out.push((storage::identity_key(namespace::OPERATOR, identity), storage::encode(authorized)?));
        }
        for (seq, snapshot) in self.snapshots.iter().enumerate() {
            out.push((storage::sequence_key(namespace::YIELD_SNAPSHOT, seq as u64), storage::encode(snapshot)?));
        }
        for event in self.events.events() {
            out.push((storage::sequence_key(namespace::EVENT, event.id), storage::encode(event)?));
        }

        Ok(out)
    }

    /// SHA-256 over [`records`](Self::records) plus the owner
    pub fn state_digest(&self) -> PoolResult<[u8; 32]> {
        let mut digest = StateDigest::new();
        digest.update(b"owner", &self.access.owner());
        for (key, value) in self.records()? {
            digest.update(&key, &value);
        }
        Ok(digest.finalize())
    }
}

// ============ Tests ============
