//! Period-over-period return indicator

use crate::common::math;
use crate::models::{Bar, ReturnIndicator};

/// Relative change of the latest close against the close `periods` samples
/// back. Returns `None` when fewer than `periods + 1` bars exist.
pub fn calculate_return(bars: &[Bar], periods: usize) -> Option<ReturnIndicator> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let value = math::relative_change(&closes, periods)?;

    Some(ReturnIndicator { value, periods })
}
