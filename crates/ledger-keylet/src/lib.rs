//! # Keylets
//!
//! Typed 256-bit identifiers for ledger state entries, derived by
//! domain-separated hashing. See spec §3, §4.3.

mod currency;
mod entry_type;
mod keylet;
mod space;

pub use currency::Currency;
pub use entry_type::LedgerEntryType;
pub use keylet::*;
pub use space::*;
