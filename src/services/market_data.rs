//! Quote source interface for price-history providers.

use crate::models::Bar;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// The source answered but has no series for the symbol.
    #[error("no data returned for symbol")]
    NoData,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("quote api returned status {status}")]
    Status { status: u16 },

    #[error("malformed quote payload: {0}")]
    Malformed(String),
}

impl QuoteError {
    /// Whether a retry could plausibly succeed. `NoData` and client errors
    /// are answers, not faults.
    pub fn is_transient(&self) -> bool {
        match self {
            QuoteError::Transport(_) => true,
            QuoteError::Status { status } => *status == 429 || *status >= 500,
            QuoteError::NoData | QuoteError::Malformed(_) => false,
        }
    }
}

#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the time-ordered close series for a symbol over a lookback
    /// range at a sampling interval (e.g. range "1d" at "5m" bars, or
    /// range "1mo" at "1d" bars). Called once per symbol per cycle.
    async fn fetch_series(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<Bar>, QuoteError>;
}
