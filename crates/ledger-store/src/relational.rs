//! Relational backend: indexes ledger headers and transactions by
//! sequence/account for history queries (spec §4.9).
//!
//! Same trait-plus-in-memory-adapter shape as `node_store`, grounded on
//! `qc-02-block-storage::ports::outbound::KeyValueStore` /
//! `InMemoryKVStore`, split into the three narrower collaborator traits
//! spec §4.9 names instead of one generic key-value interface.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use ledger_types::{AccountId, Drops, Hash256, LedgerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerHashes {
    pub ledger_hash: Hash256,
    pub parent_hash: Hash256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedLedgerInfo {
    pub sequence: u32,
    pub hash: Hash256,
    pub parent_hash: Hash256,
    pub close_time: u64,
    pub total_drops: Drops,
}

pub trait LedgerRepo: Send + Sync {
    fn save_validated_ledger(&self, info: ValidatedLedgerInfo, validated: bool) -> LedgerResult<()>;
    fn get_hashes_by_range(&self, min: u32, max: u32) -> LedgerResult<BTreeMap<u32, LedgerHashes>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountTxMarker {
    pub ledger_seq: u32,
    pub tx_hash: Hash256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountTxRecord {
    pub account: AccountId,
    pub ledger_seq: u32,
    pub tx_hash: Hash256,
}

#[derive(Debug, Clone)]
pub struct AccountTxPageOptions {
    pub account: AccountId,
    pub ledger_range: (u32, u32),
    pub limit: u32,
    pub marker: Option<AccountTxMarker>,
}

#[derive(Debug, Clone)]
pub struct AccountTxPage {
    pub ledger_range: (u32, u32),
    pub marker: Option<AccountTxMarker>,
    pub transactions: Vec<AccountTxRecord>,
    pub limit: u32,
}

pub trait AccountTxRepo: Send + Sync {
    fn get_oldest_account_txs_page(&self, options: &AccountTxPageOptions) -> LedgerResult<AccountTxPage>;
    fn get_newest_account_txs_page(&self, options: &AccountTxPageOptions) -> LedgerResult<AccountTxPage>;
}

pub trait TxHistoryRepo: Send + Sync {
    fn get_tx_history(&self, start_seq: u32, count: u32) -> LedgerResult<Vec<AccountTxRecord>>;
}

/// In-memory reference implementation backing all three repo traits.
#[derive(Default)]
pub struct InMemoryRelationalStore {
    ledgers: RwLock<BTreeMap<u32, (ValidatedLedgerInfo, bool)>>,
    account_txs: RwLock<Vec<AccountTxRecord>>,
}

impl InMemoryRelationalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test/seed helper: records a transaction against an account at a
    /// given ledger sequence, as the transaction engine collaborator
    /// would after applying it (out of scope here; see spec §1).
    pub fn record_account_tx(&self, record: AccountTxRecord) {
        self.account_txs.write().push(record);
    }
}

impl LedgerRepo for InMemoryRelationalStore {
    fn save_validated_ledger(&self, info: ValidatedLedgerInfo, validated: bool) -> LedgerResult<()> {
        self.ledgers.write().insert(info.sequence, (info, validated));
        Ok(())
    }

    fn get_hashes_by_range(&self, min: u32, max: u32) -> LedgerResult<BTreeMap<u32, LedgerHashes>> {
        let ledgers = self.ledgers.read();
        let mut out = BTreeMap::new();
        for (seq, (info, _)) in ledgers.range(min..=max) {
            out.insert(
                *seq,
                LedgerHashes {
                    ledger_hash: info.hash,
                    parent_hash: info.parent_hash,
                },
            );
        }
        Ok(out)
    }
}

impl InMemoryRelationalStore {
    fn account_txs_in_range(&self, account: AccountId, range: (u32, u32)) -> Vec<AccountTxRecord> {
        self.account_txs
            .read()
            .iter()
            .filter(|r| r.account == account && r.ledger_seq >= range.0 && r.ledger_seq <= range.1)
            .cloned()
            .collect()
    }
}

impl AccountTxRepo for InMemoryRelationalStore {
    fn get_oldest_account_txs_page(&self, options: &AccountTxPageOptions) -> LedgerResult<AccountTxPage> {
        let mut matches = self.account_txs_in_range(options.account, options.ledger_range);
        matches.sort_by_key(|r| (r.ledger_seq, r.tx_hash));
        paginate(matches, options)
    }

    fn get_newest_account_txs_page(&self, options: &AccountTxPageOptions) -> LedgerResult<AccountTxPage> {
        let mut matches = self.account_txs_in_range(options.account, options.ledger_range);
        matches.sort_by_key(|r| std::cmp::Reverse((r.ledger_seq, r.tx_hash)));
        paginate(matches, options)
    }
}

impl TxHistoryRepo for InMemoryRelationalStore {
    fn get_tx_history(&self, start_seq: u32, count: u32) -> LedgerResult<Vec<AccountTxRecord>> {
        let mut all: Vec<AccountTxRecord> = self
            .account_txs
            .read()
            .iter()
            .filter(|r| r.ledger_seq >= start_seq)
            .cloned()
            .collect();
        all.sort_by_key(|r| (r.ledger_seq, r.tx_hash));
        all.truncate(count as usize);
        Ok(all)
    }
}

fn paginate(sorted: Vec<AccountTxRecord>, options: &AccountTxPageOptions) -> LedgerResult<AccountTxPage> {
    let start_index = match &options.marker {
        None => 0,
        Some(marker) => sorted
            .iter()
            .position(|r| r.ledger_seq == marker.ledger_seq && r.tx_hash == marker.tx_hash)
            .map(|i| i + 1)
            .unwrap_or(sorted.len()),
    };

    let remaining = &sorted[start_index.min(sorted.len())..];
    let limit = options.limit.max(1) as usize;
    let page: Vec<AccountTxRecord> = remaining.iter().take(limit).cloned().collect();
    let more_remain = remaining.len() > limit;

    let next_marker = if more_remain {
        page.last().map(|r| AccountTxMarker {
            ledger_seq: r.ledger_seq,
            tx_hash: r.tx_hash,
        })
    } else {
        None
    };

    Ok(AccountTxPage {
        ledger_range: options.ledger_range,
        marker: next_marker,
        transactions: page,
        limit: options.limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(byte: u8) -> AccountId {
        AccountId([byte; 20])
    }

    fn ledger_info(seq: u32) -> ValidatedLedgerInfo {
        ValidatedLedgerInfo {
            sequence: seq,
            hash: Hash256::new([seq as u8; 32]),
            parent_hash: Hash256::new([(seq - 1) as u8; 32]),
            close_time: seq as u64,
            total_drops: Drops(0),
        }
    }

    #[test]
    fn save_and_fetch_hashes_by_range() {
        let store = InMemoryRelationalStore::new();
        for seq in 1..=5u32 {
            store.save_validated_ledger(ledger_info(seq), true).unwrap();
        }
        let hashes = store.get_hashes_by_range(2, 4).unwrap();
        assert_eq!(hashes.len(), 3);
        assert_eq!(hashes[&2].ledger_hash, Hash256::new([2; 32]));
    }

    #[test]
    fn account_tx_pagination_walks_forward() {
        let store = InMemoryRelationalStore::new();
        let account = acc(1);
        for seq in 1..=5u32 {
            store.record_account_tx(AccountTxRecord {
                account,
                ledger_seq: seq,
                tx_hash: Hash256::new([seq as u8; 32]),
            });
        }

        let mut options = AccountTxPageOptions {
            account,
            ledger_range: (1, 5),
            limit: 2,
            marker: None,
        };
        let page1 = store.get_oldest_account_txs_page(&options).unwrap();
        assert_eq!(page1.transactions.len(), 2);
        assert_eq!(page1.transactions[0].ledger_seq, 1);
        assert!(page1.marker.is_some());

        options.marker = page1.marker;
        let page2 = store.get_oldest_account_txs_page(&options).unwrap();
        assert_eq!(page2.transactions[0].ledger_seq, 3);

        options.marker = page2.marker;
        let page3 = store.get_oldest_account_txs_page(&options).unwrap();
        assert_eq!(page3.transactions.len(), 1);
        assert!(page3.marker.is_none());
    }

    #[test]
    fn newest_page_walks_backward() {
        let store = InMemoryRelationalStore::new();
        let account = acc(2);
        for seq in 1..=3u32 {
            store.record_account_tx(AccountTxRecord {
                account,
                ledger_seq: seq,
                tx_hash: Hash256::new([seq as u8; 32]),
            });
        }
        let options = AccountTxPageOptions {
            account,
            ledger_range: (1, 3),
            limit: 10,
            marker: None,
        };
        let page = store.get_newest_account_txs_page(&options).unwrap();
        assert_eq!(page.transactions[0].ledger_seq, 3);
        assert_eq!(page.transactions.last().unwrap().ledger_seq, 1);
    }

    #[test]
    fn tx_history_respects_start_and_count() {
        let store = InMemoryRelationalStore::new();
        for seq in 1..=5u32 {
            store.record_account_tx(AccountTxRecord {
                account: acc(1),
                ledger_seq: seq,
                tx_hash: Hash256::new([seq as u8; 32]),
            });
        }
        let history = store.get_tx_history(3, 2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].ledger_seq, 3);
        assert_eq!(history[1].ledger_seq, 4);
    }
}
