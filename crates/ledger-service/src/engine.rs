//! The transaction-engine collaborator surface (spec §1: "consumes the
//! ledger as a mutable view; this spec treats it as a collaborator that
//! reads/writes entries and reports a result"). Application semantics for
//! any given transaction type are explicitly out of scope; this module
//! only defines the view the engine is handed and the outcome it reports.

use ledger_core::LedgerVersion;
use ledger_types::{Drops, LedgerResult};

/// Fee/sequence context the writer assembles from the current open ledger
/// before invoking the engine (spec §4.8).
#[derive(Debug, Clone, Copy)]
pub struct EngineView {
    pub base_fee: Drops,
    pub reserve_base: Drops,
    pub reserve_increment: Drops,
    pub ledger_sequence: u32,
    pub skip_signature_verification: bool,
}

/// What the engine reports back after attempting to apply one transaction.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub result_code: String,
    pub applied: bool,
    pub fee: Drops,
    pub metadata: Vec<u8>,
    pub message: String,
}

/// Injected collaborator that applies a transaction blob against the open
/// ledger's mutable state-trie view. Application logic for specific
/// transaction types is out of scope here (spec §1); this trait is the
/// narrow seam the ledger manager calls through.
pub trait TransactionEngine: Send + Sync {
    fn apply(
        &self,
        view: &EngineView,
        open_ledger: &mut LedgerVersion,
        tx_blob: &[u8],
    ) -> LedgerResult<ApplyOutcome>;
}

/// An engine that accepts every transaction without mutating ledger state,
/// for hosts that haven't wired up a real engine yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransactionEngine;

impl TransactionEngine for NoopTransactionEngine {
    fn apply(
        &self,
        view: &EngineView,
        _open_ledger: &mut LedgerVersion,
        _tx_blob: &[u8],
    ) -> LedgerResult<ApplyOutcome> {
        Ok(ApplyOutcome {
            result_code: "tesSUCCESS".to_string(),
            applied: false,
            fee: view.base_fee,
            metadata: Vec::new(),
            message: "no transaction engine configured".to_string(),
        })
    }
}
