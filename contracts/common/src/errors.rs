//! Error Types for the Yield Pool
//!
//! Every failure is a distinct, enumerable kind. Operations validate all
//! preconditions before their first write, so an error always means the
//! ledger is exactly as it was before the call.

use crate::types::Address;

/// Result type alias for yield pool operations
pub type PoolResult<T> = Result<T, PoolError>;

/// Main error enum for all yield pool errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    // ============ Authorization Errors ============
    /// Operation is reserved for the pool owner
    #[error("only the pool owner may perform this action")]
    OwnerOnly { caller: Address },

    /// Caller is neither the owner nor an authorized operator
    #[error("caller is not authorized")]
    Unauthorized { caller: Address },

    // ============ Position Errors ============
    /// No position exists for the identity
    #[error("no position found for depositor")]
    NotFound { depositor: Address },

    /// Withdrawal exceeds the withdrawable principal
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: u64, requested: u64 },

    // ============ Amount Errors ============
    /// Amount or parameter outside its permitted range
    #[error("invalid amount {amount}: {reason}")]
    InvalidAmount { amount: u64, reason: &'static str },

    /// Deposit below the configured minimum
    #[error("deposit {amount} below minimum {minimum}")]
    BelowMinDeposit { amount: u64, minimum: u64 },

    /// Depositor's principal would exceed the per-user cap
    #[error("principal {resulting} would exceed per-user cap {maximum}")]
    AboveMaxDeposit { resulting: u64, maximum: u64 },

    /// Pool liquidity would exceed the pool cap
    #[error("pool liquidity {resulting} would exceed pool cap {maximum}")]
    PoolFull { resulting: u64, maximum: u64 },

    // ============ Security Gate Errors ============
    /// Pool has been administratively deactivated
    #[error("pool is inactive")]
    PoolInactive,

    /// Pool is under emergency pause
    #[error("pool is paused")]
    Paused,

    /// Resume attempted before the cooldown elapsed
    #[error("cooldown active: {remaining} blocks remaining at height {current}")]
    CooldownActive { remaining: u64, current: u64 },

    /// Pause while paused, or resume while active
    #[error("invalid security state transition")]
    InvalidStateTransition,

    // ============ Event Log Errors ============
    /// Event log cannot accept another entry
    #[error("event log exhausted at id {next_id}")]
    LogFailure { next_id: u64 },

    // ============ Host / Math Errors ============
    /// Operation presented a height below one already processed
    #[error("height {current} is below last processed height {last_seen}")]
    ClockRegression { last_seen: u64, current: u64 },

    /// Arithmetic overflow occurred
    #[error("arithmetic overflow")]
    Overflow,

    /// Genesis configuration rejected
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    /// A record could not be encoded for storage
    #[error("record encoding failed: {reason}")]
    Encoding { reason: String },
}

impl PoolError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::OwnerOnly { .. } => "E001_OWNER_ONLY",
            Self::Unauthorized { .. } => "E002_UNAUTHORIZED",
            Self::NotFound { .. } => "E010_NOT_FOUND",
            Self::InsufficientBalance { .. } => "E011_INSUFFICIENT_BALANCE",
            Self::InvalidAmount { .. } => "E020_INVALID_AMOUNT",
            Self::BelowMinDeposit { .. } => "E021_BELOW_MIN_DEPOSIT",
            Self::AboveMaxDeposit { .. } => "E022_ABOVE_MAX_DEPOSIT",
            Self::PoolFull { .. } => "E023_POOL_FULL",
            Self::PoolInactive => "E030_POOL_INACTIVE",
            Self::Paused => "E031_PAUSED",
            Self::CooldownActive { .. } => "E032_COOLDOWN_ACTIVE",
            Self::InvalidStateTransition => "E033_INVALID_TRANSITION",
            Self::LogFailure { .. } => "E040_LOG_FAILURE",
            Self::ClockRegression { .. } => "E050_CLOCK_REGRESSION",
            Self::Overflow => "E051_OVERFLOW",
            Self::Config { .. } => "E060_CONFIG",
            Self::Encoding { .. } => "E061_ENCODING",
        }
    }

    /// Returns true if the caller can succeed by resubmitting later or
    /// with a different amount
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientBalance { .. }
                | Self::BelowMinDeposit { .. }
                | Self::AboveMaxDeposit { .. }
                | Self::PoolFull { .. }
                | Self::CooldownActive { .. }
                | Self::Paused
        )
    }
}
