//! Ledger header, lifecycle, fees, and genesis construction (spec §3,
//! §4.2, §4.4, §4.5).

mod fees;
mod genesis;
mod header;
mod ledger_version;

pub use fees::FeeSettings;
pub use genesis::{build_genesis, genesis_account_id, GenesisConfig, INITIAL_XRP_DROPS};
pub use header::{
    LedgerHeader, HEADER_PLAIN_SIZE, HEADER_WIRE_PREFIX, HEADER_WITH_HASH_SIZE,
    LEDGER_MASTER_PREFIX, MAX_CLOSE_TIME_RESOLUTION, MIN_CLOSE_TIME_RESOLUTION,
};
pub use ledger_version::{LedgerState, LedgerVersion};
