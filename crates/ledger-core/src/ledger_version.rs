//! The ledger version state machine: header + state trie + tx trie + fees,
//! moving `open -> closed -> validated` (spec §3, §4.4).
//!
//! Grounded on `qc-02-block-storage::domain::entities::StoredBlock` and
//! `StorageMetadata` (a finalization flag that only ever moves forward and
//! gates further mutation), generalized to the three-state lifecycle and
//! the hash-trie-backed content this workspace uses instead of raw block
//! bytes.

use ledger_keylet::Keylet;
use ledger_trie::{HashTrie, VisitControl};
use ledger_types::{Drops, Hash256, LedgerError, LedgerResult};

use crate::fees::FeeSettings;
use crate::header::LedgerHeader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    Open,
    Closed,
    Validated,
}

/// A single ledger version: header fields, state trie, transaction trie,
/// fee settings, and a lifecycle flag.
#[derive(Debug, Clone)]
pub struct LedgerVersion {
    sequence: u32,
    parent_hash: Hash256,
    parent_close_time: u64,
    state_trie: HashTrie,
    tx_trie: HashTrie,
    fees: FeeSettings,
    total_drops: Drops,
    close_time: u64,
    close_time_resolution: u32,
    close_flags: u8,
    hash: Option<Hash256>,
    state: LedgerState,
}

impl LedgerVersion {
    /// Construct a fresh open ledger. `state_trie` is expected to already
    /// be a copy-on-write snapshot of the parent's state (spec §3: "opening
    /// a ledger preserves all state entries from its parent").
    pub fn new_open(
        sequence: u32,
        parent_hash: Hash256,
        parent_close_time: u64,
        state_trie: HashTrie,
        fees: FeeSettings,
        total_drops: Drops,
        close_time_resolution: u32,
    ) -> Self {
        LedgerVersion {
            sequence,
            parent_hash,
            parent_close_time,
            state_trie,
            tx_trie: HashTrie::new(),
            fees,
            total_drops,
            close_time: 0,
            close_time_resolution,
            close_flags: 0,
            hash: None,
            state: LedgerState::Open,
        }
    }

    /// Construct an already-closed ledger directly (used by genesis
    /// construction, which produces a closed-and-validated ledger 1
    /// without going through `new_open` + `close`).
    #[allow(clippy::too_many_arguments)]
    pub fn new_closed(
        sequence: u32,
        parent_hash: Hash256,
        parent_close_time: u64,
        state_trie: HashTrie,
        tx_trie: HashTrie,
        fees: FeeSettings,
        total_drops: Drops,
        close_time: u64,
        close_time_resolution: u32,
        close_flags: u8,
    ) -> Self {
        let mut version = LedgerVersion {
            sequence,
            parent_hash,
            parent_close_time,
            state_trie,
            tx_trie,
            fees,
            total_drops,
            close_time,
            close_time_resolution,
            close_flags,
            hash: None,
            state: LedgerState::Closed,
        };
        version.hash = Some(version.compute_header().calculate_hash());
        version
    }

    fn compute_header(&self) -> LedgerHeader {
        LedgerHeader {
            ledger_index: self.sequence,
            drops: self.total_drops,
            parent_hash: self.parent_hash,
            tx_hash: self.tx_trie.root_cached(),
            account_hash: self.state_trie.root_cached(),
            parent_close_time: self.parent_close_time,
            close_time: self.close_time,
            close_time_resolution: self.close_time_resolution,
            close_flags: self.close_flags,
        }
    }

    pub fn exists(&self, keylet: Keylet) -> bool {
        self.state_trie.exists(keylet.key)
    }

    pub fn read(&self, keylet: Keylet) -> LedgerResult<Vec<u8>> {
        self.state_trie
            .read(keylet.key)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| LedgerError::not_found_keylet(keylet.key))
    }

    pub fn write(&mut self, keylet: Keylet, bytes: Vec<u8>) -> LedgerResult<()> {
        self.require_open()?;
        self.state_trie.write(keylet.key, bytes);
        Ok(())
    }

    /// Returns `true` if an entry was present and removed.
    pub fn delete(&mut self, keylet: Keylet) -> LedgerResult<bool> {
        self.require_open()?;
        Ok(self.state_trie.delete(keylet.key))
    }

    /// Visits state entries in sorted key order.
    pub fn for_each(&self, visitor: impl FnMut(Hash256, &[u8]) -> VisitControl) {
        self.state_trie.for_each(visitor);
    }

    /// Visits transaction entries in sorted key order.
    pub fn for_each_transaction(&self, visitor: impl FnMut(Hash256, &[u8]) -> VisitControl) {
        self.tx_trie.for_each(visitor);
    }

    pub fn add_transaction(&mut self, hash: Hash256, bytes: Vec<u8>) -> LedgerResult<()> {
        self.require_open()?;
        self.tx_trie.write(hash, bytes);
        Ok(())
    }

    /// Moves `open -> closed`: freezes `close_time`, `tx_hash`,
    /// `account_hash`, and the self-hash.
    pub fn close(&mut self, close_time: u64, flags: u8) -> LedgerResult<()> {
        if self.state != LedgerState::Open {
            return Err(LedgerError::BadState(
                "close requires an open ledger".to_string(),
            ));
        }
        self.close_time = close_time;
        self.close_flags = flags;
        self.state = LedgerState::Closed;
        self.hash = Some(self.compute_header().calculate_hash());
        Ok(())
    }

    /// Moves `closed -> validated`. Idempotent once validated; cannot be
    /// called on an open ledger.
    pub fn set_validated(&mut self) -> LedgerResult<()> {
        match self.state {
            LedgerState::Open => Err(LedgerError::BadState(
                "set_validated requires a closed ledger".to_string(),
            )),
            LedgerState::Closed => {
                self.state = LedgerState::Validated;
                Ok(())
            }
            LedgerState::Validated => Ok(()),
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn parent_hash(&self) -> Hash256 {
        self.parent_hash
    }

    pub fn total_drops(&self) -> Drops {
        self.total_drops
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, LedgerState::Closed | LedgerState::Validated)
    }

    pub fn is_validated(&self) -> bool {
        matches!(self.state, LedgerState::Validated)
    }

    pub fn state(&self) -> LedgerState {
        self.state
    }

    pub fn fees(&self) -> FeeSettings {
        self.fees
    }

    pub fn set_fees(&mut self, fees: FeeSettings) -> LedgerResult<()> {
        self.require_open()?;
        self.fees = fees;
        Ok(())
    }

    /// The ledger's self-hash. Undefined until close (spec §3).
    pub fn hash(&self) -> LedgerResult<Hash256> {
        self.hash
            .ok_or_else(|| LedgerError::BadState("ledger has no self-hash until closed".to_string()))
    }

    /// The close time. Undefined until close.
    pub fn close_time(&self) -> LedgerResult<u64> {
        if self.state == LedgerState::Open {
            return Err(LedgerError::BadState(
                "ledger has no fixed close_time until closed".to_string(),
            ));
        }
        Ok(self.close_time)
    }

    pub fn header(&self) -> LedgerResult<LedgerHeader> {
        if self.state == LedgerState::Open {
            return Err(LedgerError::BadState(
                "ledger header is not fixed until closed".to_string(),
            ));
        }
        Ok(self.compute_header())
    }

    pub fn serialize_header(&self, include_hash: bool) -> LedgerResult<Vec<u8>> {
        let header = self.header()?;
        if include_hash {
            Ok(header.serialize_with_hash(self.hash()?))
        } else {
            Ok(header.serialize_plain())
        }
    }

    /// Copy-on-write snapshot of the state trie, used to seed a successor
    /// open ledger (spec §3: "a new open ledger is created from the last
    /// closed ledger").
    pub fn snapshot_state_trie(&self) -> HashTrie {
        self.state_trie.clone()
    }

    fn require_open(&self) -> LedgerResult<()> {
        if self.state != LedgerState::Open {
            return Err(LedgerError::Immutable);
        }
        Ok(())
    }
}
