//! Pool Events
//!
//! Every successful user or admin operation appends exactly one event.
//! Ids start at 0 and increase by one per entry; entries are never
//! mutated or removed.
//!
//! Operations call [`EventLog::reserve`] before their first write and
//! [`EventLog::append`] as their last step, so an exhausted log fails the
//! whole operation instead of leaving an undocumented mutation behind.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::{PoolError, PoolResult};
use crate::types::Address;

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Ledger Events (0x01 - 0x1F)
    Deposit = 0x01,
    Withdraw = 0x02,
    Claim = 0x03,

    // Parameter Events (0x20 - 0x3F)
    YieldRate = 0x20,
    ParamsUpdate = 0x21,
    PoolStatus = 0x22,

    // Security Events (0x40 - 0x5F)
    EmergencyPause = 0x40,
    EmergencyResume = 0x41,

    // Access Events (0x60 - 0x7F)
    AddOperator = 0x60,
    RemoveOperator = 0x61,
}

impl EventType {
    /// Upper-case tag used in logs and by indexers
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::Claim => "CLAIM",
            Self::YieldRate => "YIELD_RATE",
            Self::ParamsUpdate => "PARAMS_UPDATE",
            Self::PoolStatus => "POOL_STATUS",
            Self::EmergencyPause => "EMERGENCY_PAUSE",
            Self::EmergencyResume => "EMERGENCY_RESUME",
            Self::AddOperator => "ADD_OPERATOR",
            Self::RemoveOperator => "REMOVE_OPERATOR",
        }
    }
}

/// A logged state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolEvent {
    /// Sequence id
    pub id: u64,
    /// What happened
    pub event_type: EventType,
    /// Who did it
    pub actor: Address,
    /// Value moved, new rate, or flag, depending on type
    pub amount: u64,
    /// Height of the operation
    pub block_height: u64,
}

/// Append-only event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<PoolEvent>,
    capacity: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self::bounded(u64::MAX)
    }

    /// Create a log that accepts at most `capacity` entries
    pub fn bounded(capacity: u64) -> Self {
        Self {
            events: Vec::new(),
            capacity,
        }
    }

    /// Id the next entry will receive
    pub fn next_id(&self) -> u64 {
        self.events.len() as u64
    }

    /// Confirm the log can take one more entry and return its id.
    ///
    /// Does not mutate; pair with [`append`](Self::append) after all
    /// other writes of the operation succeed.
    pub fn reserve(&self) -> PoolResult<u64> {
        let next_id = self.next_id();
        if next_id >= self.capacity {
            return Err(PoolError::LogFailure { next_id });
        }
        Ok(next_id)
    }

    /// Append an event under a previously reserved id
    pub fn append(
        &mut self,
        reserved_id: u64,
        event_type: EventType,
        actor: Address,
        amount: u64,
        block_height: u64,
    ) -> u64 {
        debug_assert_eq!(reserved_id, self.next_id(), "event id reservation out of order");
        self.events.push(PoolEvent {
            id: reserved_id,
            event_type,
            actor,
            amount,
            block_height,
        });
        log::debug!(
            "event #{} {} actor={:02x?} amount={} height={}",
            reserved_id,
            event_type.tag(),
            &actor[..4],
            amount,
            block_height
        );
        reserved_id
    }

    /// Look up an event by id
    pub fn get(&self, id: u64) -> Option<&PoolEvent> {
        usize::try_from(id).ok().and_then(|i| self.events.get(i))
    }

    /// Get all events
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&PoolEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get number of events
    pub fn len(&self) -> u64 {
        self.next_id()
    }

    /// Check if no events were emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
