use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;

use tracker::configure::load_config;
use tracker::logger::setup_logger;
use tracker::tracking::{
    HttpFlowStatusFetcher, PollerConfig, PollingOrchestrator, TransactionStore,
};

#[derive(Parser, Debug)]
#[command(name = "tracker", about = "Cross-chain transfer status tracker")]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    setup_logger(&config)?;

    let store = Arc::new(TransactionStore::open(&config.db_path)?);
    log::info!("Store opened at {} ({} records)", config.db_path, store.len());

    let fetcher = Arc::new(HttpFlowStatusFetcher::new(&config.status_url));
    let poller_config = PollerConfig {
        poll_interval_ms: config.poll_interval_ms,
        default_timeout_ms: config.poll_timeout_ms,
        chain_timeout_ms: config.chain_timeout_ms.clone(),
        cache_ttl_secs: config.cache_ttl_secs,
        ..PollerConfig::default()
    };

    let orchestrator = Arc::new(PollingOrchestrator::new(store, fetcher, poller_config));

    // Pick up transfers that were in flight when the process last stopped
    let resumed = orchestrator.resume_in_progress();
    log::info!("Tracker started, {} polling jobs resumed", resumed);

    orchestrator.run().await;
    Ok(())
}
