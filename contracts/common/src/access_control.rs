//! Access Control Module
//!
//! Two tiers of authority:
//!
//! - **Owner**: bound at genesis, never transferable; may do anything.
//! - **Operator**: delegated by the owner; may trigger an emergency pause
//!   but nothing else.
//!
//! Callers with neither tier get `Unauthorized`. Operators reaching for an
//! owner-reserved action get `OwnerOnly`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{PoolError, PoolResult};
use crate::types::Address;

// ============================================================================
// Types
// ============================================================================

/// Authority a caller holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authority {
    /// The genesis owner
    Owner,
    /// A delegated operator
    Operator,
}

/// Admin actions, each mapped to the minimum authority it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    SetYieldRate,
    SetPoolParameters,
    SetPoolActive,
    EmergencyPause,
    EmergencyResume,
    ManageOperators,
}

impl Permission {
    /// Whether an operator may exercise this permission
    pub fn delegable(&self) -> bool {
        matches!(self, Permission::EmergencyPause)
    }
}

/// Owner identity plus the operator authorization map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlState {
    /// Immutable owner
    owner: Address,
    /// identity -> authorized; revoked entries stay as `false`
    operators: BTreeMap<Address, bool>,
}

impl AccessControlState {
    /// Create access control state owned by `owner`
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            operators: BTreeMap::new(),
        }
    }

    /// The genesis owner
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Whether `address` is a currently authorized operator
    pub fn is_operator(&self, address: &Address) -> bool {
        self.operators.get(address).copied().unwrap_or(false)
    }

    /// Operator map in key order (revoked entries included)
    pub fn operators(&self) -> &BTreeMap<Address, bool> {
        &self.operators
    }
}

// ============================================================================
// Core Access Control Functions
// ============================================================================

/// Resolve the authority `caller` holds, if any
pub fn authority_of(state: &AccessControlState, caller: &Address) -> Option<Authority> {
    if *caller == state.owner {
        Some(Authority::Owner)
    } else if state.is_operator(caller) {
        Some(Authority::Operator)
    } else {
        None
    }
}

/// Require `caller` to hold `permission`
pub fn require_permission(
    state: &AccessControlState,
    caller: &Address,
    permission: Permission,
) -> PoolResult<Authority> {
    match authority_of(state, caller) {
        Some(Authority::Owner) => Ok(Authority::Owner),
        Some(Authority::Operator) if permission.delegable() => Ok(Authority::Operator),
        Some(Authority::Operator) => {
            log::warn!("operator {:02x?} denied {:?}", &caller[..4], permission);
            Err(PoolError::OwnerOnly { caller: *caller })
        }
        None => {
            log::warn!("unauthorized caller {:02x?} denied {:?}", &caller[..4], permission);
            Err(PoolError::Unauthorized { caller: *caller })
        }
    }
}

/// Authorize or revoke an operator. Caller must be checked beforehand.
pub fn set_operator(state: &mut AccessControlState, operator: Address, authorized: bool) {
    state.operators.insert(operator, authorized);
}

// ============================================================================
// Tests
// ============================================================================
