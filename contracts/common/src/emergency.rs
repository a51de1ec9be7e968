//! Emergency Module
//!
//! Pause/resume state machine guarding every user operation.
//!
//! ```text
//!   Active --pause--> Paused --resume (after cooldown)--> Active
//! ```
//!
//! The pool also carries an independent `pool_active` flag toggled by the
//! owner; the gate reports the two conditions as different errors so
//! callers can tell administrative shutdown from an emergency halt.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::{PoolError, PoolResult};

// ============================================================================
// Types
// ============================================================================

/// Security singleton
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SecurityState {
    /// Whether an emergency pause is in force
    pub emergency_paused: bool,
    /// Height of the most recent pause or resume
    pub last_emergency_action_height: u64,
}

impl SecurityState {
    /// Create new security state (active)
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks elapsed since the last pause or resume
    pub fn blocks_since_action(&self, current_block: u64) -> u64 {
        current_block.saturating_sub(self.last_emergency_action_height)
    }
}

// ============================================================================
// Core Emergency Functions
// ============================================================================

/// Gate consulted by every user operation
pub fn check_gate(pool_active: bool, state: &SecurityState) -> PoolResult<()> {
    if !pool_active {
        return Err(PoolError::PoolInactive);
    }
    if state.emergency_paused {
        return Err(PoolError::Paused);
    }
    Ok(())
}

/// Validate `Active -> Paused`
pub fn check_pause(state: &SecurityState) -> PoolResult<()> {
    if state.emergency_paused {
        return Err(PoolError::InvalidStateTransition);
    }
    Ok(())
}

/// Validate `Paused -> Active` at `current_block`
pub fn check_resume(state: &SecurityState, cooldown_period: u64, current_block: u64) -> PoolResult<()> {
    if !state.emergency_paused {
        return Err(PoolError::InvalidStateTransition);
    }
    let remaining = cooldown_remaining(state, cooldown_period, current_block);
    if remaining > 0 {
        return Err(PoolError::CooldownActive {
            remaining,
            current: current_block,
        });
    }
    Ok(())
}

/// Enter the paused state. Call [`check_pause`] first.
pub fn apply_pause(state: &mut SecurityState, current_block: u64) {
    state.emergency_paused = true;
    state.last_emergency_action_height = current_block;
    log::warn!("emergency pause at height {}", current_block);
}

/// Leave the paused state. Call [`check_resume`] first.
pub fn apply_resume(state: &mut SecurityState, current_block: u64) {
    state.emergency_paused = false;
    state.last_emergency_action_height = current_block;
    log::warn!("emergency resume at height {}", current_block);
}

/// Blocks left before a resume is allowed (0 when not paused)
pub fn cooldown_remaining(state: &SecurityState, cooldown_period: u64, current_block: u64) -> u64 {
    if !state.emergency_paused {
        return 0;
    }
    cooldown_period.saturating_sub(state.blocks_since_action(current_block))
}

// ============================================================================
// Tests
// ============================================================================
