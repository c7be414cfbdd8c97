//! The ledger manager: accept-ledger, the query surface, pagination, and
//! asynchronous event dispatch (spec §4.8, §4.10, §5).

mod engine;
mod events;
mod pagination;
mod selector;
mod service;
mod time_source;

pub use engine::{ApplyOutcome, EngineView, NoopTransactionEngine, TransactionEngine};
pub use events::{
    EventHub, LedgerClosedInfo, LegacyEventPayload, TransactionInfo, DEFAULT_QUEUE_CAPACITY,
};
pub use pagination::{
    clamp_limit, format_marker, parse_marker, ACCOUNT_DEFAULT_LIMIT, LEDGER_DATA_DEFAULT_LIMIT,
    NFT_MAX_LIMIT,
};
pub use selector::{parse_selector, LedgerSelector};
pub use service::{LedgerDataPage, LedgerService, ServiceConfig, ServiceDependencies, SubmitResult};
pub use time_source::{FixedTimeSource, SystemTimeSource, TimeSource};
