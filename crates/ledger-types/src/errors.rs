//! The ledger engine's single error taxonomy.
//!
//! Every fallible operation across the workspace returns `Result<T, LedgerError>`.
//! Propagation policy: all errors are returned, none swallowed, except where a
//! scanning/iteration operation explicitly documents that it skips malformed
//! entries instead (see `ledger-core`'s `for_each` family).

use thiserror::Error;

use crate::hash::Hash256;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("write operation requires standalone mode")]
    NotStandalone,

    #[error("no open ledger exists")]
    NoOpenLedger,

    #[error("no closed ledger exists")]
    NoClosedLedger,

    #[error("no validated ledger exists")]
    NoValidatedLedger,

    #[error("ledger not found: {0}")]
    LedgerNotFound(String),

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("invalid state transition: {0}")]
    BadState(String),

    #[error("write attempted on immutable (closed) ledger")]
    Immutable,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("backend error: {0}")]
    BackendError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl LedgerError {
    pub fn not_found_keylet(key: Hash256) -> Self {
        LedgerError::NotFound(format!("keylet {key}"))
    }

    pub fn ledger_not_found_seq(seq: u32) -> Self {
        LedgerError::LedgerNotFound(format!("sequence {seq}"))
    }

    pub fn ledger_not_found_hash(hash: Hash256) -> Self {
        LedgerError::LedgerNotFound(format!("hash {hash}"))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
