//! # Shared ledger types
//!
//! The single source of truth for domain scalars and the error taxonomy
//! used across every crate in the ledger engine workspace.

mod account;
mod errors;
mod hash;

pub use account::{AccountId, Drops};
pub use errors::{LedgerError, LedgerResult};
pub use hash::Hash256;

/// Seconds since the ledger epoch (2000-01-01 00:00:00 UTC), per spec §6.
pub const LEDGER_EPOCH_UNIX_OFFSET: u64 = 946_684_800;

/// Closed-ledger flag bit: validators agreed on content but not on close time.
pub const CLOSE_FLAG_NO_CONSENSUS_TIME: u8 = 0x01;

/// The funded genesis account address, per spec §4.5 / §8 scenario 1.
pub const GENESIS_ACCOUNT_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
