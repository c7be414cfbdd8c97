//! Persistence collaborator interfaces: the node-store and the relational
//! backend (spec §4.9), plus in-memory reference adapters of each.

mod node_store;
mod relational;

pub use node_store::{InMemoryNodeStore, Node, NodeStore, NodeType};
pub use relational::{
    AccountTxMarker, AccountTxPage, AccountTxPageOptions, AccountTxRecord, AccountTxRepo,
    InMemoryRelationalStore, LedgerHashes, LedgerRepo, TxHistoryRepo, ValidatedLedgerInfo,
};
