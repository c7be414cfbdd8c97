//! # SHA-512Half hashing
//!
//! The one cryptographic primitive the rest of the ledger engine builds on:
//! concatenate every input, run SHA-512, keep the first 32 bytes. Every
//! ledger hash, keylet key, and trie node hash in this workspace bottoms
//! out here.
//!
//! Not side-channel hardened; no guarantees beyond constant-time-per-input-byte.

use sha2::{Digest, Sha512};

use ledger_types::Hash256;

/// Stateful SHA-512Half hasher, for callers that build up input incrementally.
pub struct Sha512HalfHasher {
    inner: Sha512,
}

impl Sha512HalfHasher {
    pub fn new() -> Self {
        Self {
            inner: Sha512::new(),
        }
    }

    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.inner.update(data.as_ref());
        self
    }

    pub fn finalize(self) -> Hash256 {
        let digest = self.inner.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest[..32]);
        Hash256::new(out)
    }
}

impl Default for Sha512HalfHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a single input in one shot.
pub fn sha512_half(data: impl AsRef<[u8]>) -> Hash256 {
    let mut hasher = Sha512HalfHasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Hash the concatenation of multiple inputs, in order, in one shot.
pub fn sha512_half_many(parts: &[&[u8]]) -> Hash256 {
    let mut hasher = Sha512HalfHasher::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}
