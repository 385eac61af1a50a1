use serde::{Deserialize, Serialize};

/// One row of the persisted snapshot. Values are already rounded for
/// presentation; the ranking itself is done on unrounded returns upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub symbol: String,
    pub price: f64,
    pub moving_average: f64,
    #[serde(rename = "return")]
    pub ret: f64,
    /// Set by the rank-then-annotate policy variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifies: Option<bool>,
    /// Set by the classify-all policy variant ("buy" / "do not buy").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}
