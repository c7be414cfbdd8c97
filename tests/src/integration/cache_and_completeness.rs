//! The bounded cache and completeness tracking, exercised against a real
//! chain of closed ledgers produced by `LedgerService` rather than
//! hand-built fixtures.

use std::sync::Arc;

use ledger_cache::LedgerCache;
use ledger_core::GenesisConfig;
use ledger_service::{FixedTimeSource, LedgerService, NoopTransactionEngine, ServiceConfig, ServiceDependencies};

fn service_with_cache_capacity(capacity: usize) -> LedgerService {
    let deps = ServiceDependencies {
        time_source: Arc::new(FixedTimeSource::new(700_000_000)),
        engine: Arc::new(NoopTransactionEngine),
        node_store: None,
        ledger_repo: None,
        account_tx_repo: None,
        tx_history_repo: None,
    };
    LedgerService::new(
        ServiceConfig {
            standalone: true,
            cache_capacity: capacity,
            genesis: GenesisConfig::default(),
            ..ServiceConfig::default()
        },
        deps,
    )
}

#[test]
fn queries_for_evicted_sequences_still_resolve_through_history() {
    let svc = service_with_cache_capacity(2);
    svc.start().unwrap();
    for _ in 0..5 {
        svc.accept_ledger().unwrap();
    }

    // Sequence 2 (the first closed ledger) is long since evicted from the
    // 2-entry cache, but the service's own history index still has it.
    let ledger2 = svc.get_ledger_for_query("2").unwrap();
    assert_eq!(ledger2.sequence(), 2);

    let recent = svc.get_ledger_for_query("6").unwrap();
    assert_eq!(recent.sequence(), 6);
}

#[test]
fn cache_hit_rate_reflects_recency_eviction_across_a_real_chain() {
    let cache = LedgerCache::new(2);
    let svc = service_with_cache_capacity(1_000_000);
    svc.start().unwrap();
    for _ in 0..3 {
        svc.accept_ledger().unwrap();
    }

    // Feed the closed ledgers (sequences 2..=4) into a standalone cache of
    // capacity 2 the same way the service's internal cache would.
    for seq in 2..=4u32 {
        cache.put(svc.get_ledger_for_query(&seq.to_string()).unwrap());
    }

    assert!(cache.get(2).is_none());
    assert!(cache.get(3).is_some());
    assert!(cache.get(4).is_some());

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate - (2.0 / 3.0)).abs() < 1e-9);
}

#[test]
fn completeness_tracks_every_sequence_ever_cached_even_after_eviction() {
    let cache = LedgerCache::new(2);
    let svc = service_with_cache_capacity(1_000_000);
    svc.start().unwrap();
    for _ in 0..4 {
        svc.accept_ledger().unwrap();
    }
    for seq in [3u32, 2, 5, 4] {
        cache.put(svc.get_ledger_for_query(&seq.to_string()).unwrap());
    }

    for seq in 2..=5u32 {
        assert!(cache.completeness_contains(seq));
    }
    assert!(!cache.completeness_contains(1));
    assert!(!cache.completeness_contains(6));

    // Evicting the LRU entries doesn't erase the completeness record.
    assert!(cache.get(2).is_none());
    assert!(cache.completeness_contains(2));
}
