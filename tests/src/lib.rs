//! # Integration tests
//!
//! Exercises the ledger engine crates together instead of in isolation:
//! service startup and the accept-ledger chain, persistence backends wired
//! through the service, cache/completeness behavior under real ledger
//! traffic, and state-trie invariants across multiple keylet families.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── lib.rs                 # This file
//! │   └── integration/
//! │       ├── mod.rs
//! │       ├── genesis_and_lifecycle.rs
//! │       ├── persistence.rs
//! │       ├── cache_and_completeness.rs
//! │       └── state_trie_properties.rs
//! ```

pub mod integration;
