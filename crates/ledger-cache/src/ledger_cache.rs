//! Bounded LRU ledger cache, keyed by sequence and by hash (spec §4.7).
//!
//! Grounded on `qc-04-state-management::domain::cache::VersionedAccountCache`:
//! an `lru::LruCache` wrapped with a stats struct, generalized from a single
//! head-tagged cache to the dual sequence/hash indexing spec §3 requires,
//! and from per-call locking to a shared `parking_lot::RwLock` so the cache
//! can be handed out to concurrent readers (spec §4.7, §5).

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::RwLock;

use ledger_core::LedgerVersion;
use ledger_types::Hash256;

use crate::completeness::CompletenessSet;

pub const DEFAULT_MAX_RECENT: usize = 256;

struct Inner {
    by_seq: LruCache<u32, Arc<LedgerVersion>>,
    by_hash: LruCache<Hash256, u32>,
    completeness: CompletenessSet,
    hits: u64,
    misses: u64,
}

/// Bounded-recency cache of closed ledger versions, with an embedded
/// completeness set tracking which historical sequences have ever been
/// cached.
pub struct LedgerCache {
    inner: RwLock<Inner>,
}

impl LedgerCache {
    pub fn new(max_recent: usize) -> Self {
        let cap = NonZeroUsize::new(max_recent.max(1)).unwrap();
        Self {
            inner: RwLock::new(Inner {
                by_seq: LruCache::new(cap),
                by_hash: LruCache::new(cap),
                completeness: CompletenessSet::new(),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Inserts `ledger` under both the sequence and hash keys. The ledger
    /// must already be closed (it needs a stable `hash()`); an open ledger
    /// is a logic error here and panics, the same way indexing a ledger
    /// with no fixed hash would be elsewhere in this workspace.
    pub fn put(&self, ledger: Arc<LedgerVersion>) {
        let hash = ledger
            .hash()
            .expect("only closed ledgers are cached");
        let seq = ledger.sequence();
        let mut inner = self.inner.write();
        inner.by_seq.put(seq, ledger);
        inner.by_hash.put(hash, seq);
        inner.completeness.add(seq);
    }

    pub fn get(&self, seq: u32) -> Option<Arc<LedgerVersion>> {
        let mut inner = self.inner.write();
        let found = inner.by_seq.get(&seq).cloned();
        if found.is_some() {
            inner.hits += 1;
        } else {
            inner.misses += 1;
        }
        found
    }

    pub fn get_by_hash(&self, hash: Hash256) -> Option<Arc<LedgerVersion>> {
        let mut inner = self.inner.write();
        let seq = inner.by_hash.get(&hash).copied();
        match seq {
            Some(seq) => {
                let found = inner.by_seq.get(&seq).cloned();
                if found.is_some() {
                    inner.hits += 1;
                } else {
                    inner.misses += 1;
                }
                found
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Removes the entry for `seq`, cascading removal of its hash entry.
    pub fn remove(&self, seq: u32) {
        let mut inner = self.inner.write();
        if let Some(ledger) = inner.by_seq.pop(&seq) {
            if let Ok(hash) = ledger.hash() {
                inner.by_hash.pop(&hash);
            }
        }
    }

    /// Empties both LRUs; the completeness set is retained.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.by_seq.clear();
        inner.by_hash.clear();
    }

    pub fn clear_completeness(&self) {
        self.inner.write().completeness.clear();
    }

    pub fn completeness_contains(&self, seq: u32) -> bool {
        self.inner.read().completeness.contains(seq)
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        let total = inner.hits + inner.misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            inner.hits as f64 / total as f64
        };
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            hit_rate,
            by_seq_len: inner.by_seq.len(),
            by_hash_len: inner.by_hash.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub by_seq_len: usize,
    pub by_hash_len: usize,
}
