//! Service startup, the standalone accept-ledger chain, and selector
//! resolution, driven through `LedgerService` rather than `LedgerVersion`
//! directly.

use std::sync::Arc;

use ledger_core::GenesisConfig;
use ledger_service::{
    FixedTimeSource, LedgerService, NoopTransactionEngine, ServiceConfig, ServiceDependencies,
};
use ledger_store::InMemoryNodeStore;
use ledger_types::LedgerError;

fn standalone_service() -> LedgerService {
    let deps = ServiceDependencies {
        time_source: Arc::new(FixedTimeSource::new(700_000_000)),
        engine: Arc::new(NoopTransactionEngine),
        node_store: Some(Arc::new(InMemoryNodeStore::new())),
        ledger_repo: None,
        account_tx_repo: None,
        tx_history_repo: None,
    };
    LedgerService::new(
        ServiceConfig {
            standalone: true,
            genesis: GenesisConfig::default(),
            ..ServiceConfig::default()
        },
        deps,
    )
}

#[test]
fn genesis_is_the_fixed_starting_point() {
    let svc = standalone_service();
    svc.start().unwrap();

    let genesis = svc.get_ledger_for_query("1").unwrap();
    assert_eq!(genesis.sequence(), 1);
    assert!(genesis.is_validated());

    let closed = svc.get_ledger_for_query("closed").unwrap();
    let validated = svc.get_ledger_for_query("validated").unwrap();
    assert_eq!(closed.hash().unwrap(), genesis.hash().unwrap());
    assert_eq!(validated.hash().unwrap(), genesis.hash().unwrap());

    let open = svc.get_ledger_for_query("current").unwrap();
    assert_eq!(open.sequence(), 2);
    assert_eq!(open.parent_hash(), genesis.hash().unwrap());
}

#[test]
fn accept_ledger_chain_advances_five_times_with_unbroken_parent_links() {
    let svc = standalone_service();
    svc.start().unwrap();

    let mut closed_hashes = Vec::new();
    for expected_seq in 2..=6u32 {
        let seq = svc.accept_ledger().unwrap();
        assert_eq!(seq, expected_seq);
        closed_hashes.push(svc.get_ledger_for_query(&seq.to_string()).unwrap().hash().unwrap());
    }

    assert_eq!(svc.get_ledger_for_query("current").unwrap().sequence(), 7);
    assert_eq!(svc.get_ledger_for_query("validated").unwrap().sequence(), 6);

    for seq in 3..=6u32 {
        let ledger = svc.get_ledger_for_query(&seq.to_string()).unwrap();
        let parent = svc.get_ledger_for_query(&(seq - 1).to_string()).unwrap();
        assert_eq!(ledger.parent_hash(), parent.hash().unwrap());
    }
    assert_eq!(closed_hashes.len(), 5);
}

#[test]
fn non_standalone_service_refuses_to_close_ledgers() {
    let deps = ServiceDependencies {
        time_source: Arc::new(FixedTimeSource::new(700_000_000)),
        engine: Arc::new(NoopTransactionEngine),
        node_store: None,
        ledger_repo: None,
        account_tx_repo: None,
        tx_history_repo: None,
    };
    let svc = LedgerService::new(
        ServiceConfig {
            standalone: false,
            ..ServiceConfig::default()
        },
        deps,
    );
    svc.start().unwrap();
    assert_eq!(svc.accept_ledger(), Err(LedgerError::NotStandalone));
    // The open ledger is still readable; only closing is refused.
    assert_eq!(svc.get_ledger_for_query("current").unwrap().sequence(), 2);
}

#[test]
fn selector_resolves_every_named_and_numeric_form() {
    let svc = standalone_service();
    svc.start().unwrap();
    for _ in 0..3 {
        svc.accept_ledger().unwrap();
    }

    assert_eq!(svc.get_ledger_for_query("current").unwrap().sequence(), 5);
    assert_eq!(svc.get_ledger_for_query("closed").unwrap().sequence(), 4);
    assert_eq!(svc.get_ledger_for_query("validated").unwrap().sequence(), 4);
    assert_eq!(svc.get_ledger_for_query("2").unwrap().sequence(), 2);
    assert_eq!(
        svc.get_ledger_for_query("999").unwrap_err(),
        LedgerError::ledger_not_found_seq(999)
    );
    assert!(matches!(
        svc.get_ledger_for_query("not-a-selector"),
        Err(LedgerError::InvalidArgument(_))
    ));
}
