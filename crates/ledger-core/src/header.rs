//! The fixed-layout ledger header, its serialization, and its hash.
//!
//! Grounded on `qc-02-block-storage::domain::snapshot::header` (a
//! fixed-field header struct with explicit big-endian wire encode/decode)
//! and spec §3, §4.2, §6.

use ledger_crypto::sha512_half_many;
use ledger_types::{Drops, Hash256, LedgerError, LedgerResult};

/// Domain tag prepended to header-hash inputs (spec §6). Consensus-relevant;
/// must match byte-for-byte across implementations.
pub const LEDGER_MASTER_PREFIX: [u8; 4] = *b"LWR\0";

/// Literal 4-byte marker prepended to the "prefixed" wire form; skipped on
/// deserialization. This implementation reuses `LEDGER_MASTER_PREFIX` as
/// the wire marker too (spec §6 does not name a distinct value).
pub const HEADER_WIRE_PREFIX: [u8; 4] = LEDGER_MASTER_PREFIX;

pub const HEADER_PLAIN_SIZE: usize = 129;
pub const HEADER_WITH_HASH_SIZE: usize = HEADER_PLAIN_SIZE + 32;

pub const MIN_CLOSE_TIME_RESOLUTION: u32 = 2;
pub const MAX_CLOSE_TIME_RESOLUTION: u32 = 120;

/// Fixed-layout ledger header (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerHeader {
    pub ledger_index: u32,
    pub drops: Drops,
    pub parent_hash: Hash256,
    pub tx_hash: Hash256,
    pub account_hash: Hash256,
    pub parent_close_time: u64,
    pub close_time: u64,
    pub close_time_resolution: u32,
    pub close_flags: u8,
}

impl LedgerHeader {
    /// Serialize the plain 129-byte big-endian form.
    pub fn serialize_plain(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_PLAIN_SIZE);
        out.extend_from_slice(&self.ledger_index.to_be_bytes());
        out.extend_from_slice(&self.drops.0.to_be_bytes());
        out.extend_from_slice(self.parent_hash.as_bytes());
        out.extend_from_slice(self.tx_hash.as_bytes());
        out.extend_from_slice(self.account_hash.as_bytes());
        out.extend_from_slice(&self.parent_close_time.to_be_bytes());
        out.extend_from_slice(&self.close_time.to_be_bytes());
        out.extend_from_slice(&self.close_time_resolution.to_be_bytes());
        out.push(self.close_flags);
        debug_assert_eq!(out.len(), HEADER_PLAIN_SIZE);
        out
    }

    /// Serialize the plain form with the self-hash appended (161 bytes).
    pub fn serialize_with_hash(&self, hash: Hash256) -> Vec<u8> {
        let mut out = self.serialize_plain();
        out.extend_from_slice(hash.as_bytes());
        out
    }

    /// Serialize the "prefixed" wire form: 4-byte marker + plain form.
    pub fn serialize_prefixed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + HEADER_PLAIN_SIZE);
        out.extend_from_slice(&HEADER_WIRE_PREFIX);
        out.extend_from_slice(&self.serialize_plain());
        out
    }

    /// Deserialize the plain 129-byte form.
    pub fn deserialize_plain(bytes: &[u8]) -> LedgerResult<Self> {
        if bytes.len() < HEADER_PLAIN_SIZE {
            return Err(LedgerError::SerializationError(format!(
                "ledger header too short: expected {HEADER_PLAIN_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let mut cursor = 0usize;
        let mut take = |n: usize| {
            let slice = &bytes[cursor..cursor + n];
            cursor += n;
            slice
        };
        let ledger_index = u32::from_be_bytes(take(4).try_into().unwrap());
        let drops = Drops(u64::from_be_bytes(take(8).try_into().unwrap()));
        let parent_hash = Hash256::new(take(32).try_into().unwrap());
        let tx_hash = Hash256::new(take(32).try_into().unwrap());
        let account_hash = Hash256::new(take(32).try_into().unwrap());
        let parent_close_time = u64::from_be_bytes(take(8).try_into().unwrap());
        let close_time = u64::from_be_bytes(take(8).try_into().unwrap());
        let close_time_resolution = u32::from_be_bytes(take(4).try_into().unwrap());
        let close_flags = take(1)[0];

        Ok(LedgerHeader {
            ledger_index,
            drops,
            parent_hash,
            tx_hash,
            account_hash,
            parent_close_time,
            close_time,
            close_time_resolution,
            close_flags,
        })
    }

    /// Deserialize the "prefixed" wire form, skipping the leading 4 bytes.
    pub fn deserialize_prefixed(bytes: &[u8]) -> LedgerResult<Self> {
        if bytes.len() < 4 + HEADER_PLAIN_SIZE {
            return Err(LedgerError::SerializationError(
                "prefixed ledger header too short".to_string(),
            ));
        }
        Self::deserialize_plain(&bytes[4..])
    }

    /// `sha512_half(LedgerMasterPrefix || ledger_index_be32 || drops_be64 ||
    /// parent_hash || tx_hash || account_hash || parent_close_time_be32 ||
    /// close_time_be32 || close_time_resolution_u8 || close_flags_u8)`.
    ///
    /// Close times are truncated to their low 32 bits for hashing even
    /// though the wire form carries 64-bit timestamps (spec §4.2, §9).
    pub fn calculate_hash(&self) -> Hash256 {
        let ledger_index_be = self.ledger_index.to_be_bytes();
        let drops_be = self.drops.0.to_be_bytes();
        let parent_close_time_be32 = (self.parent_close_time as u32).to_be_bytes();
        let close_time_be32 = (self.close_time as u32).to_be_bytes();
        let resolution_byte = [self.close_time_resolution as u8];
        let flags_byte = [self.close_flags];

        sha512_half_many(&[
            &LEDGER_MASTER_PREFIX,
            &ledger_index_be,
            &drops_be,
            self.parent_hash.as_bytes(),
            self.tx_hash.as_bytes(),
            self.account_hash.as_bytes(),
            &parent_close_time_be32,
            &close_time_be32,
            &resolution_byte,
            &flags_byte,
        ])
    }
}
