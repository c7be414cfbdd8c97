//! Deterministic construction of ledger 1 (spec §4.5).
//!
//! Grounded on `qc-02-block-storage::domain::entities` genesis-block
//! handling (a fixed, argument-free construction of the chain's root
//! record) generalized to this workspace's state-trie-backed ledger.

use ledger_crypto::sha512_half;
use ledger_keylet::{account_root, amendments as amendments_keylet, fee_settings};
use ledger_trie::HashTrie;
use ledger_types::{AccountId, Drops, Hash256, GENESIS_ACCOUNT_ADDRESS};

use crate::fees::FeeSettings;
use crate::ledger_version::LedgerVersion;

/// Total native-asset supply minted at genesis (100 billion XRP, expressed
/// in drops — one ten-millionth of the unit).
pub const INITIAL_XRP_DROPS: u64 = 100_000_000_000_000_000;

/// Default close-time resolution assigned to the genesis ledger.
pub const GENESIS_CLOSE_TIME_RESOLUTION: u32 = 10;

/// Inputs to genesis construction (spec §4.5).
#[derive(Debug, Clone, Default)]
pub struct GenesisConfig {
    /// Explicit fee schedule override; if absent, derived from
    /// `use_modern_fees`.
    pub fees: Option<FeeSettings>,
    pub use_modern_fees: bool,
    /// Amendment identifiers to seed the `Amendments` singleton with. Empty
    /// means no amendments singleton is written at all.
    pub amendments: Vec<Hash256>,
}

/// The well-known genesis account's 20-byte ID. Address-string decoding
/// (base58/seed derivation) is outside this workspace's scope, so the ID is
/// derived deterministically from the well-known address string itself —
/// a stand-in that reproduces the same fixed constant on every run.
pub fn genesis_account_id() -> AccountId {
    let digest = sha512_half(GENESIS_ACCOUNT_ADDRESS.as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest.as_bytes()[..20]);
    AccountId(bytes)
}

/// Minimal `AccountRoot` entry encoding: big-endian balance followed by a
/// starting sequence of 1. Full account-entry shape (flags, owner count,
/// regular key, …) is transaction-engine territory, out of scope here.
fn encode_account_root(balance: Drops, sequence: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(12);
    out.extend_from_slice(&balance.0.to_be_bytes());
    out.extend_from_slice(&sequence.to_be_bytes());
    out
}

fn encode_amendments(ids: &[Hash256]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ids.len() * 32);
    for id in ids {
        out.extend_from_slice(id.as_bytes());
    }
    out
}

/// Builds ledger 1: funded genesis account, fees singleton, and an optional
/// amendments singleton. Returns a closed (not yet validated) ledger —
/// moving it to `validated` is the caller's responsibility (mirrors the
/// service startup sequence in spec §4.8, which treats "set validated" as
/// a distinct step from construction).
pub fn build_genesis(config: &GenesisConfig) -> LedgerVersion {
    let fees = config
        .fees
        .unwrap_or_else(|| FeeSettings::select(config.use_modern_fees));

    let mut state_trie = HashTrie::new();

    let account = genesis_account_id();
    state_trie.write(
        account_root(account).key,
        encode_account_root(Drops(INITIAL_XRP_DROPS), 1),
    );
    state_trie.write(fee_settings().key, fees.encode());
    if !config.amendments.is_empty() {
        state_trie.write(amendments_keylet().key, encode_amendments(&config.amendments));
    }

    LedgerVersion::new_closed(
        1,
        Hash256::ZERO,
        0,
        state_trie,
        HashTrie::new(),
        fees,
        Drops(INITIAL_XRP_DROPS),
        0,
        GENESIS_CLOSE_TIME_RESOLUTION,
        0,
    )
}
