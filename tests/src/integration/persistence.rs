//! Wires real in-memory persistence backends through `LedgerService` and
//! checks what actually lands in them, rather than trusting the service's
//! in-process state alone.

use std::sync::Arc;

use ledger_core::{GenesisConfig, LedgerHeader};
use ledger_keylet::account_root;
use ledger_service::{FixedTimeSource, LedgerService, NoopTransactionEngine, ServiceConfig, ServiceDependencies};
use ledger_store::{AccountTxRecord, InMemoryNodeStore, InMemoryRelationalStore, NodeStore, NodeType};
use ledger_types::{AccountId, Hash256};

fn service_with_backends() -> (LedgerService, Arc<InMemoryNodeStore>, Arc<InMemoryRelationalStore>) {
    let node_store = Arc::new(InMemoryNodeStore::new());
    let relational = Arc::new(InMemoryRelationalStore::new());
    let deps = ServiceDependencies {
        time_source: Arc::new(FixedTimeSource::new(700_000_000)),
        engine: Arc::new(NoopTransactionEngine),
        node_store: Some(node_store.clone()),
        ledger_repo: Some(relational.clone()),
        account_tx_repo: Some(relational.clone()),
        tx_history_repo: Some(relational.clone()),
    };
    let svc = LedgerService::new(
        ServiceConfig {
            standalone: true,
            genesis: GenesisConfig::default(),
            ..ServiceConfig::default()
        },
        deps,
    );
    (svc, node_store, relational)
}

#[test]
fn accept_ledger_persists_header_and_state_entries_to_the_node_store() {
    let (svc, node_store, _relational) = service_with_backends();
    svc.start().unwrap();
    let seq = svc.accept_ledger().unwrap();
    let closed = svc.get_ledger_for_query(&seq.to_string()).unwrap();

    let header_node = node_store.fetch(closed.hash().unwrap()).unwrap().unwrap();
    assert_eq!(header_node.node_type, NodeType::Ledger);
    let decoded = LedgerHeader::deserialize_plain(&header_node.data).unwrap();
    assert_eq!(decoded, closed.header().unwrap());

    // The genesis account's state entry was carried over and must be
    // present as its own content-addressed node.
    let account_key = account_root(ledger_core::genesis_account_id()).key;
    assert!(node_store.exists(account_key).unwrap());
}

#[test]
fn accept_ledger_upserts_validated_ledger_info_into_the_relational_repo() {
    let (svc, _node_store, relational) = service_with_backends();
    svc.start().unwrap();
    for _ in 0..3 {
        svc.accept_ledger().unwrap();
    }

    // Genesis itself is never pushed through the relational repo — only
    // ledgers that pass through `accept_ledger` are, so the range covers
    // sequences 2..=4, not genesis's sequence 1.
    let hashes = svc.get_hashes_by_range(1, 4).unwrap();
    assert_eq!(hashes.len(), 3);
    for seq in 2..=4u32 {
        let ledger = svc.get_ledger_for_query(&seq.to_string()).unwrap();
        assert_eq!(hashes[&seq].ledger_hash, ledger.hash().unwrap());
        assert_eq!(hashes[&seq].parent_hash, ledger.parent_hash());
    }
    let _ = relational;
}

#[test]
fn account_tx_history_flows_through_the_service_query_surface() {
    let (svc, _node_store, relational) = service_with_backends();
    svc.start().unwrap();

    let account = AccountId::new([0xAB; 20]);
    for seq in 1..=3u32 {
        relational.record_account_tx(AccountTxRecord {
            account,
            ledger_seq: seq,
            tx_hash: Hash256::new([seq as u8; 32]),
        });
    }

    let oldest = svc.account_txs_oldest(account, (1, 3), Some(2), None).unwrap();
    assert_eq!(oldest.transactions.len(), 2);
    assert_eq!(oldest.transactions[0].ledger_seq, 1);
    assert!(oldest.marker.is_some());

    let rest = svc.account_txs_oldest(account, (1, 3), Some(2), oldest.marker).unwrap();
    assert_eq!(rest.transactions.len(), 1);
    assert_eq!(rest.transactions[0].ledger_seq, 3);

    let newest = svc.account_txs_newest(account, (1, 3), None, None).unwrap();
    assert_eq!(newest.transactions[0].ledger_seq, 3);

    let history = svc.tx_history(1, 10).unwrap();
    assert_eq!(history.len(), 3);
}

#[test]
fn queries_against_unconfigured_backends_report_backend_error() {
    let deps = ServiceDependencies {
        time_source: Arc::new(FixedTimeSource::new(1)),
        engine: Arc::new(NoopTransactionEngine),
        node_store: None,
        ledger_repo: None,
        account_tx_repo: None,
        tx_history_repo: None,
    };
    let svc = LedgerService::new(ServiceConfig::default(), deps);
    svc.start().unwrap();
    assert!(matches!(
        svc.get_hashes_by_range(1, 2),
        Err(ledger_types::LedgerError::BackendError(_))
    ));
    assert!(matches!(
        svc.tx_history(1, 10),
        Err(ledger_types::LedgerError::BackendError(_))
    ));
}
