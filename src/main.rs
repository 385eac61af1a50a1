//! Trendsift screener
//!
//! Long-running process that screens the configured watchlist on a fixed
//! cadence and replaces the snapshot artifact after every cycle.

use std::sync::Arc;

use dotenvy::dotenv;
use tokio::signal;
use tracing::info;
use trendsift::config::{get_environment, Config};
use trendsift::core::runtime::CycleRunner;
use trendsift::core::scheduler::{Cadence, Scheduler};
use trendsift::logging;
use trendsift::services::market_data::QuoteProvider;
use trendsift::services::yahoo::{ChartClient, YahooQuoteProvider};
use trendsift::snapshot::SnapshotWriter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;

    info!("Starting Trendsift screener");
    info!(environment = %get_environment(), "Environment");
    info!(
        symbols = config.watchlist.len(),
        sma_window = config.sma_window,
        return_lookback = config.return_lookback,
        top_n = config.top_n,
        policy = ?config.policy,
        output = %config.output_path.display(),
        "Configuration loaded"
    );
    match &config.cadence {
        Cadence::Every(period) => {
            info!(interval_secs = period.as_secs(), "Cadence: fixed interval");
        }
        Cadence::Weekly { weekday, at } => {
            info!(weekday = ?weekday, at = %at, "Cadence: weekly");
        }
    }

    let client = ChartClient::new(config.fetch_timeout)?;
    let provider: Arc<dyn QuoteProvider> =
        Arc::new(YahooQuoteProvider::new(client, config.fetch_retries));
    let writer = SnapshotWriter::new(&config.output_path);
    let runner = Arc::new(CycleRunner::new(provider, writer, config.clone()));

    let scheduler = Scheduler::new(config.cadence.clone())?;
    let cycle_runner = runner.clone();
    scheduler
        .start(move || {
            let runner = cycle_runner.clone();
            async move {
                runner.run_once().await;
            }
        })
        .await?;

    info!("Screener started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down screener...");
    scheduler.stop().await;
    info!("Screener stopped");

    Ok(())
}
