//! Standalone ledger-engine driver: starts the service, then closes the
//! open ledger a fixed number of times in a row (spec §4.2's sole
//! supported consensus mode, "close is driver-triggered").

use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ledger_core::GenesisConfig;
use ledger_service::{
    LedgerService, NoopTransactionEngine, ServiceConfig, ServiceDependencies, SystemTimeSource,
};

#[derive(Parser)]
#[clap(name = "ledger-node", about = "Standalone ledger engine driver")]
struct Args {
    /// Number of ledgers to close in a row before exiting.
    #[clap(long, default_value = "1")]
    ticks: u32,

    /// Maximum number of recently-closed ledgers the cache retains.
    #[clap(long, default_value_t = ledger_cache::DEFAULT_MAX_RECENT)]
    cache_capacity: usize,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = ServiceConfig {
        standalone: true,
        cache_capacity: args.cache_capacity,
        genesis: GenesisConfig::default(),
        ..ServiceConfig::default()
    };
    let deps = ServiceDependencies {
        time_source: Arc::new(SystemTimeSource),
        engine: Arc::new(NoopTransactionEngine),
        node_store: None,
        ledger_repo: None,
        account_tx_repo: None,
        tx_history_repo: None,
    };
    let service = LedgerService::new(config, deps);
    service.start()?;
    info!("ledger engine started, genesis at sequence 1");

    for _ in 0..args.ticks {
        let closed_seq = service.accept_ledger()?;
        info!(sequence = closed_seq, "ledger closed");
    }

    let open = service.get_ledger_for_query("current")?;
    info!(sequence = open.sequence(), "open ledger ready");

    Ok(())
}
