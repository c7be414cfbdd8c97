//! Completeness tracking and the bounded ledger cache (spec §4.6, §4.7).

mod completeness;
mod ledger_cache;

pub use completeness::CompletenessSet;
pub use ledger_cache::{CacheStats, LedgerCache, DEFAULT_MAX_RECENT};
