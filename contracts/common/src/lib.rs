//! Yield Pool Common Library
//!
//! Shared types, constants, and building blocks for the yield pool ledger.
//!
//! ## Components
//!
//! - **Constants**: Genesis defaults and hard bounds, per network
//! - **Types**: Positions, pool singleton, parameters, yield snapshots
//! - **Math**: Floor-rounded simple yield accrual
//! - **Events**: Append-only, sequentially indexed event log
//! - **Access Control**: Immutable owner plus delegated operators
//! - **Emergency**: Pause/resume gate with cooldown
//! - **Config**: Genesis configuration (TOML)
//! - **Storage**: Record keys, Borsh encoding, state digest

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod access_control;
pub mod emergency;
pub mod config;
pub mod storage;

// Re-exports for convenience
pub use errors::*;
pub use types::*;
pub use math::*;
pub use events::*;
pub use access_control::*;
pub use emergency::*;
pub use config::*;
