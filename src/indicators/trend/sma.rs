//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::{Bar, SmaIndicator};

/// Calculate the trailing SMA over the most recent `window` bars.
///
/// Returns `None` when the series is shorter than `window` — a partial or
/// zero-filled average is never emitted.
pub fn calculate_sma(bars: &[Bar], window: usize) -> Option<SmaIndicator> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let value = math::trailing_mean(&closes, window)?;

    Some(SmaIndicator { value, window })
}
