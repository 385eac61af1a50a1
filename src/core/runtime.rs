//! One screening cycle: fetch every watchlist symbol, evaluate indicators,
//! apply the ranking policy, persist the snapshot.

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::screener::engine::{self, SymbolOutcome};
use crate::screener::policy::build_entries;
use crate::services::market_data::{QuoteError, QuoteProvider};
use crate::snapshot::SnapshotWriter;

/// Counts from one completed cycle, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub evaluated: usize,
    pub skipped: usize,
    pub entries: usize,
    pub written: bool,
}

pub struct CycleRunner {
    provider: Arc<dyn QuoteProvider>,
    writer: SnapshotWriter,
    config: Config,
}

impl CycleRunner {
    pub fn new(provider: Arc<dyn QuoteProvider>, writer: SnapshotWriter, config: Config) -> Self {
        Self {
            provider,
            writer,
            config,
        }
    }

    /// Run one full cycle. Per-symbol failures degrade to skips and a write
    /// failure keeps the previous artifact in place; the cycle itself never
    /// fails.
    pub async fn run_once(&self) -> CycleReport {
        let started = Instant::now();
        info!(
            symbols = self.config.watchlist.len(),
            "screening cycle started"
        );

        // Fan out per symbol, then join: ranking needs the full outcome set.
        let outcomes = join_all(
            self.config
                .watchlist
                .iter()
                .map(|symbol| self.screen_symbol(symbol)),
        )
        .await;

        let mut evaluated = Vec::new();
        let mut skipped = 0usize;
        for (symbol, outcome) in self.config.watchlist.iter().zip(outcomes) {
            match outcome {
                SymbolOutcome::Evaluated(indicators) => evaluated.push(indicators),
                SymbolOutcome::InsufficientHistory { samples } => {
                    skipped += 1;
                    debug!(
                        symbol = %symbol,
                        samples,
                        "not enough history to compute indicators, skipping"
                    );
                }
                SymbolOutcome::NoData => {
                    skipped += 1;
                    warn!(symbol = %symbol, "no data returned, skipping");
                }
                SymbolOutcome::FetchFailed(reason) => {
                    skipped += 1;
                    warn!(symbol = %symbol, reason = %reason, "quote fetch failed, skipping");
                }
            }
        }

        let evaluated_count = evaluated.len();
        let entries = build_entries(evaluated, self.config.policy, self.config.top_n);

        let written = match self.writer.write(&entries) {
            Ok(()) => {
                info!(
                    entries = entries.len(),
                    path = %self.writer.path().display(),
                    "snapshot written"
                );
                true
            }
            Err(e) => {
                error!(
                    error = %e,
                    path = %self.writer.path().display(),
                    "snapshot write failed; previous artifact left in place"
                );
                false
            }
        };

        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            evaluated = evaluated_count,
            skipped,
            entries = entries.len(),
            "screening cycle complete"
        );

        CycleReport {
            evaluated: evaluated_count,
            skipped,
            entries: entries.len(),
            written,
        }
    }

    // Fetch bounded by the configured timeout so one hanging symbol cannot
    // stall the cycle.
    async fn screen_symbol(&self, symbol: &str) -> SymbolOutcome {
        let fetch = self.provider.fetch_series(
            symbol,
            &self.config.quote_range,
            &self.config.quote_interval,
        );
        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Err(_) => SymbolOutcome::FetchFailed(format!(
                "timed out after {}s",
                self.config.fetch_timeout.as_secs()
            )),
            Ok(Err(QuoteError::NoData)) => SymbolOutcome::NoData,
            Ok(Err(e)) => SymbolOutcome::FetchFailed(e.to_string()),
            Ok(Ok(bars)) => engine::evaluate(
                symbol,
                &bars,
                self.config.sma_window,
                self.config.return_lookback,
            ),
        }
    }
}
