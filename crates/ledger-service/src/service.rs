//! The ledger manager: owns the open/closed/validated triad, drives
//! standalone accept-ledger, and exposes the read/write query surface
//! (spec §4.8).
//!
//! Grounded on `qc-02-block-storage::service::mod::BlockStorageService` /
//! `BlockStorageDependencies` for the dependency-injected service struct
//! shape, simplified from the teacher's five generic trait-bound type
//! parameters down to `Arc<dyn Trait>` collaborator slots — this
//! workspace's persistence/engine surface is two optional backends and one
//! engine, not five mandatory ones, so trait objects read more plainly
//! than threading five more type parameters through every call site.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use ledger_core::{build_genesis, GenesisConfig, LedgerVersion};
use ledger_store::{
    AccountTxMarker, AccountTxPage, AccountTxRepo, LedgerRepo, NodeStore, Node, NodeType,
    TxHistoryRepo, ValidatedLedgerInfo,
};
use ledger_trie::VisitControl;
use ledger_types::{AccountId, Drops, Hash256, LedgerError, LedgerResult};

use ledger_cache::LedgerCache;

use crate::engine::{EngineView, TransactionEngine};
use crate::events::{EventHub, LedgerClosedInfo, TransactionInfo};
use crate::pagination::{clamp_limit, format_marker, parse_marker, ACCOUNT_DEFAULT_LIMIT, LEDGER_DATA_DEFAULT_LIMIT, NFT_MAX_LIMIT};
use crate::selector::{parse_selector, LedgerSelector};
use crate::time_source::TimeSource;

/// Collaborators injected at construction time; every persistence
/// backend and the engine are optional except the clock (spec §4.8: "an
/// optional node-store handle", "an optional relational-DB handle").
pub struct ServiceDependencies {
    pub time_source: Arc<dyn TimeSource>,
    pub engine: Arc<dyn TransactionEngine>,
    pub node_store: Option<Arc<dyn NodeStore>>,
    pub ledger_repo: Option<Arc<dyn LedgerRepo>>,
    pub account_tx_repo: Option<Arc<dyn AccountTxRepo>>,
    pub tx_history_repo: Option<Arc<dyn TxHistoryRepo>>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub standalone: bool,
    pub cache_capacity: usize,
    pub event_queue_capacity: usize,
    pub genesis: GenesisConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            standalone: true,
            cache_capacity: ledger_cache::DEFAULT_MAX_RECENT,
            event_queue_capacity: crate::events::DEFAULT_QUEUE_CAPACITY,
            genesis: GenesisConfig::default(),
        }
    }
}

struct ServiceState {
    open: LedgerVersion,
    closed: Arc<LedgerVersion>,
    validated: Arc<LedgerVersion>,
    history: BTreeMap<u32, Arc<LedgerVersion>>,
    tx_index: HashMap<Hash256, u32>,
}

#[derive(Debug, Clone)]
pub struct SubmitResult {
    pub result_code: String,
    pub applied: bool,
    pub fee: Drops,
    pub metadata: Vec<u8>,
    pub message: String,
    pub current_ledger: u32,
    pub validated_ledger: u32,
}

#[derive(Debug, Clone)]
pub struct LedgerDataPage {
    pub entries: Vec<(Hash256, Vec<u8>)>,
    pub marker: Option<String>,
}

/// The ledger engine's single writer/many-reader manager (spec §4.8, §5).
pub struct LedgerService {
    standalone: bool,
    state: RwLock<Option<ServiceState>>,
    cache: LedgerCache,
    node_store: Option<Arc<dyn NodeStore>>,
    ledger_repo: Option<Arc<dyn LedgerRepo>>,
    account_tx_repo: Option<Arc<dyn AccountTxRepo>>,
    tx_history_repo: Option<Arc<dyn TxHistoryRepo>>,
    time_source: Arc<dyn TimeSource>,
    engine: Arc<dyn TransactionEngine>,
    events: EventHub,
    genesis_config: GenesisConfig,
}

fn require_started(state: &Option<ServiceState>) -> LedgerResult<&ServiceState> {
    state.as_ref().ok_or(LedgerError::NoOpenLedger)
}

fn require_started_mut(state: &mut Option<ServiceState>) -> LedgerResult<&mut ServiceState> {
    state.as_mut().ok_or(LedgerError::NoOpenLedger)
}

impl LedgerService {
    pub fn new(config: ServiceConfig, deps: ServiceDependencies) -> Self {
        LedgerService {
            standalone: config.standalone,
            state: RwLock::new(None),
            cache: LedgerCache::new(config.cache_capacity),
            node_store: deps.node_store,
            ledger_repo: deps.ledger_repo,
            account_tx_repo: deps.account_tx_repo,
            tx_history_repo: deps.tx_history_repo,
            time_source: deps.time_source,
            engine: deps.engine,
            events: EventHub::new(config.event_queue_capacity),
            genesis_config: config.genesis,
        }
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// Creates the genesis ledger; sets `closed = validated = genesis`;
    /// creates `open` as genesis's successor (spec §4.8 Startup). Calling
    /// `start` twice is a logic error.
    pub fn start(&self) -> LedgerResult<()> {
        let mut guard = self.state.write();
        if guard.is_some() {
            return Err(LedgerError::BadState("service already started".to_string()));
        }

        let mut genesis = build_genesis(&self.genesis_config);
        genesis.set_validated()?;
        let genesis = Arc::new(genesis);
        let header = genesis.header()?;
        let open = LedgerVersion::new_open(
            genesis.sequence() + 1,
            genesis.hash()?,
            genesis.close_time()?,
            genesis.snapshot_state_trie(),
            genesis.fees(),
            genesis.total_drops(),
            header.close_time_resolution,
        );

        let mut history = BTreeMap::new();
        history.insert(genesis.sequence(), genesis.clone());
        self.cache.put(genesis.clone());

        *guard = Some(ServiceState {
            open,
            closed: genesis.clone(),
            validated: genesis,
            history,
            tx_index: HashMap::new(),
        });
        Ok(())
    }

    /// Standalone close: closes the open ledger, marks it validated,
    /// persists it through whichever backends are configured, installs it
    /// into history, opens a fresh successor, and publishes events (spec
    /// §4.8 steps 1-10). Leaves the open ledger untouched if any fallible
    /// step fails, since nothing is mutated in place until every step
    /// before installation has succeeded.
    pub fn accept_ledger(&self) -> LedgerResult<u32> {
        if !self.standalone {
            return Err(LedgerError::NotStandalone);
        }
        let close_time = self.time_source.now();

        let (closed_seq, closed_hash, closed_parent_hash, tx_infos, range) = {
            let mut guard = self.state.write();
            let state = require_started_mut(&mut guard)?;

            let mut closing = state.open.clone();
            closing.close(close_time, 0)?;
            closing.set_validated()?;
            let closed_hash = closing.hash()?;
            let closed = Arc::new(closing);

            let mut tx_infos = Vec::new();
            closed.for_each_transaction(|hash, _bytes| {
                tx_infos.push(TransactionInfo {
                    tx_hash: hash,
                    result: "tesSUCCESS".to_string(),
                    ledger_seq: closed.sequence(),
                    ledger_hash: closed_hash,
                    close_time,
                });
                VisitControl::Continue
            });

            if let Some(node_store) = &self.node_store {
                let mut nodes = Vec::new();
                closed.for_each(|key, bytes| {
                    nodes.push(Node {
                        node_type: NodeType::Account,
                        hash: key,
                        data: bytes.to_vec(),
                        ledger_seq: closed.sequence(),
                    });
                    VisitControl::Continue
                });
                node_store.store_batch(nodes)?;
                node_store.store(Node {
                    node_type: NodeType::Ledger,
                    hash: closed_hash,
                    data: closed.serialize_header(false)?,
                    ledger_seq: closed.sequence(),
                })?;
                node_store.sync()?;
            }

            if let Some(ledger_repo) = &self.ledger_repo {
                ledger_repo.save_validated_ledger(
                    ValidatedLedgerInfo {
                        sequence: closed.sequence(),
                        hash: closed_hash,
                        parent_hash: closed.parent_hash(),
                        close_time,
                        total_drops: closed.total_drops(),
                    },
                    true,
                )?;
            }

            state.history.insert(closed.sequence(), closed.clone());
            state.closed = closed.clone();
            state.validated = closed.clone();
            for tx in &tx_infos {
                state.tx_index.insert(tx.tx_hash, closed.sequence());
            }

            let header = closed.header()?;
            state.open = LedgerVersion::new_open(
                closed.sequence() + 1,
                closed_hash,
                closed.close_time()?,
                closed.snapshot_state_trie(),
                closed.fees(),
                closed.total_drops(),
                header.close_time_resolution,
            );

            self.cache.put(closed.clone());

            let range = match (state.history.keys().next(), state.history.keys().next_back()) {
                (Some(min), Some(max)) => format!("{min}-{max}"),
                _ => "empty".to_string(),
            };

            (closed.sequence(), closed_hash, closed.parent_hash(), tx_infos, range)
        };

        self.events.publish_ledger_closed(
            LedgerClosedInfo {
                sequence: closed_seq,
                hash: closed_hash,
                parent_hash: closed_parent_hash,
                close_time,
                tx_count: tx_infos.len(),
                validated_ledgers_range: range,
            },
            tx_infos,
        );

        Ok(closed_seq)
    }

    /// Resolves a query-time selector to the ledger it names (spec §4.8
    /// read paths). Takes only the shared lock.
    pub fn get_ledger_for_query(&self, selector: &str) -> LedgerResult<Arc<LedgerVersion>> {
        let parsed = parse_selector(selector)?;
        let guard = self.state.read();
        let state = require_started(&guard)?;
        match parsed {
            LedgerSelector::Open => Ok(Arc::new(state.open.clone())),
            LedgerSelector::Closed => Ok(state.closed.clone()),
            LedgerSelector::Validated => Ok(state.validated.clone()),
            LedgerSelector::Sequence(seq) => {
                if seq == state.open.sequence() {
                    return Ok(Arc::new(state.open.clone()));
                }
                if let Some(cached) = self.cache.get(seq) {
                    return Ok(cached);
                }
                state
                    .history
                    .get(&seq)
                    .cloned()
                    .ok_or_else(|| LedgerError::ledger_not_found_seq(seq))
            }
        }
    }

    /// Paginated walk over a ledger's state entries (spec §4.8
    /// Pagination). `marker`, if given, must resolve to an existing key.
    pub fn ledger_data(
        &self,
        selector: &str,
        limit: Option<u32>,
        marker: Option<&str>,
    ) -> LedgerResult<LedgerDataPage> {
        let ledger = self.get_ledger_for_query(selector)?;
        let limit = clamp_limit(limit, LEDGER_DATA_DEFAULT_LIMIT, LEDGER_DATA_DEFAULT_LIMIT);
        let after = marker.map(parse_marker).transpose()?;

        let mut entries: Vec<(Hash256, Vec<u8>)> = Vec::new();
        let mut found_marker = after.is_none();
        let mut more_remain = false;
        ledger.for_each(|key, bytes| {
            if !found_marker {
                if Some(key) == after {
                    found_marker = true;
                }
                return VisitControl::Continue;
            }
            if entries.len() >= limit as usize {
                more_remain = true;
                return VisitControl::Stop;
            }
            entries.push((key, bytes.to_vec()));
            VisitControl::Continue
        });

        if !found_marker {
            return Err(LedgerError::InvalidArgument(
                "marker does not resolve to an existing key".to_string(),
            ));
        }

        let next_marker = if more_remain {
            entries.last().map(|(k, _)| format_marker(*k))
        } else {
            None
        };

        Ok(LedgerDataPage { entries, marker: next_marker })
    }

    /// Applies a transaction through the injected engine collaborator
    /// (spec §4.8 Write paths). Requires an open ledger.
    pub fn submit_transaction(&self, tx_hash: Hash256, tx_blob: &[u8]) -> LedgerResult<SubmitResult> {
        let mut guard = self.state.write();
        let state = require_started_mut(&mut guard)?;

        let fees = state.open.fees();
        let view = EngineView {
            base_fee: fees.base_fee,
            reserve_base: fees.reserve_base,
            reserve_increment: fees.reserve_increment,
            ledger_sequence: state.open.sequence(),
            skip_signature_verification: false,
        };
        let outcome = self.engine.apply(&view, &mut state.open, tx_blob)?;
        if outcome.applied {
            state.open.add_transaction(tx_hash, tx_blob.to_vec())?;
        }

        Ok(SubmitResult {
            result_code: outcome.result_code,
            applied: outcome.applied,
            fee: outcome.fee,
            metadata: outcome.metadata,
            message: outcome.message,
            current_ledger: state.open.sequence(),
            validated_ledger: state.validated.sequence(),
        })
    }

    /// Writes a pre-built transaction blob into the open ledger's tx trie
    /// directly, bypassing the engine (spec §5 writer-op list names this
    /// separately from `submit_transaction`).
    pub fn store_transaction(&self, tx_hash: Hash256, bytes: Vec<u8>) -> LedgerResult<()> {
        let mut guard = self.state.write();
        let state = require_started_mut(&mut guard)?;
        state.open.add_transaction(tx_hash, bytes)
    }

    pub fn get_hashes_by_range(
        &self,
        min: u32,
        max: u32,
    ) -> LedgerResult<BTreeMap<u32, ledger_store::LedgerHashes>> {
        let repo = self
            .ledger_repo
            .as_ref()
            .ok_or_else(|| LedgerError::BackendError("no relational backend configured".to_string()))?;
        repo.get_hashes_by_range(min, max)
    }

    pub fn account_txs_oldest(
        &self,
        account: AccountId,
        ledger_range: (u32, u32),
        limit: Option<u32>,
        marker: Option<AccountTxMarker>,
    ) -> LedgerResult<AccountTxPage> {
        let repo = self
            .account_tx_repo
            .as_ref()
            .ok_or_else(|| LedgerError::BackendError("no account-tx backend configured".to_string()))?;
        let options = ledger_store::AccountTxPageOptions {
            account,
            ledger_range,
            limit: clamp_limit(limit, ACCOUNT_DEFAULT_LIMIT, NFT_MAX_LIMIT),
            marker,
        };
        repo.get_oldest_account_txs_page(&options)
    }

    pub fn account_txs_newest(
        &self,
        account: AccountId,
        ledger_range: (u32, u32),
        limit: Option<u32>,
        marker: Option<AccountTxMarker>,
    ) -> LedgerResult<AccountTxPage> {
        let repo = self
            .account_tx_repo
            .as_ref()
            .ok_or_else(|| LedgerError::BackendError("no account-tx backend configured".to_string()))?;
        let options = ledger_store::AccountTxPageOptions {
            account,
            ledger_range,
            limit: clamp_limit(limit, ACCOUNT_DEFAULT_LIMIT, NFT_MAX_LIMIT),
            marker,
        };
        repo.get_newest_account_txs_page(&options)
    }

    pub fn tx_history(
        &self,
        start_seq: u32,
        count: u32,
    ) -> LedgerResult<Vec<ledger_store::AccountTxRecord>> {
        let repo = self
            .tx_history_repo
            .as_ref()
            .ok_or_else(|| LedgerError::BackendError("no tx-history backend configured".to_string()))?;
        repo.get_tx_history(start_seq, clamp_limit(Some(count), ACCOUNT_DEFAULT_LIMIT, NFT_MAX_LIMIT))
    }

    pub fn transaction_ledger_sequence(&self, tx_hash: Hash256) -> LedgerResult<u32> {
        let guard = self.state.read();
        let state = require_started(&guard)?;
        state
            .tx_index
            .get(&tx_hash)
            .copied()
            .ok_or_else(|| LedgerError::not_found_keylet(tx_hash))
    }

    pub fn cache_stats(&self) -> ledger_cache::CacheStats {
        self.cache.stats()
    }
}
