//! # Hash-addressed trie
//!
//! The Merkle-like `Hash256 -> bytes` container backing both the state
//! trie and the transaction trie of a ledger version. See spec §3, §4.4.

mod nibbles;
mod node;
mod trie;

pub use node::EMPTY_TRIE_ROOT;
pub use trie::{HashTrie, VisitControl};
