//! REST client for the chart endpoint.

use std::time::Duration;

use crate::services::market_data::QuoteError;
use crate::services::yahoo::messages::{ChartResponse, ChartResult};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

pub struct ChartClient {
    base_url: String,
    http: reqwest::Client,
}

impl ChartClient {
    /// Client against the public endpoint with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, QuoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::Transport(e.to_string()))?;
        Ok(Self::with_client(DEFAULT_BASE_URL, http))
    }

    /// Client against an arbitrary base URL. Used by tests to point at a
    /// mock server.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Fetch the chart document for one symbol over `range` at `interval`
    /// granularity.
    pub async fn chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, QuoteError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .http
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // The endpoint answers 404 for unknown tickers.
            return Err(QuoteError::NoData);
        }
        if !status.is_success() {
            return Err(QuoteError::Status {
                status: status.as_u16(),
            });
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| QuoteError::Malformed(e.to_string()))?;

        if let Some(err) = body.chart.error {
            return Err(QuoteError::Malformed(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        body.chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or(QuoteError::NoData)
    }
}
