//! QuoteProvider implementation over the chart client.

use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use tracing::warn;

use crate::models::Bar;
use crate::services::market_data::{QuoteError, QuoteProvider};
use crate::services::yahoo::client::ChartClient;
use crate::services::yahoo::messages::ChartResult;

pub struct YahooQuoteProvider {
    client: ChartClient,
    max_retries: usize,
}

impl YahooQuoteProvider {
    /// `max_retries` bounds re-attempts after transient failures; 0 means a
    /// single attempt.
    pub fn new(client: ChartClient, max_retries: usize) -> Self {
        Self {
            client,
            max_retries,
        }
    }
}

#[async_trait::async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<Bar>, QuoteError> {
        let result = (|| async { self.client.chart(symbol, range, interval).await })
            .retry(ExponentialBuilder::default().with_max_times(self.max_retries))
            .when(|e: &QuoteError| e.is_transient())
            .notify(|err: &QuoteError, dur| {
                warn!(symbol = %symbol, error = %err, retry_in_ms = dur.as_millis() as u64, "transient quote fetch failure, retrying");
            })
            .await?;

        let bars = to_bars(result);
        if bars.is_empty() {
            return Err(QuoteError::NoData);
        }
        Ok(bars)
    }
}

/// Zip timestamps with closes, dropping bars with a null close, and sort
/// ascending so the series invariant holds regardless of source order.
fn to_bars(result: ChartResult) -> Vec<Bar> {
    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    let mut bars: Vec<Bar> = timestamps
        .into_iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = close?;
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            Some(Bar::new(timestamp, close))
        })
        .collect();
    bars.sort_by_key(|b| b.timestamp);
    bars
}
