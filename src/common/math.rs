//! Numeric primitives for indicator calculations.

/// Arithmetic mean of the trailing `window` values, inclusive of the latest.
///
/// Returns `None` when fewer than `window` values exist or `window` is 0.
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Relative change of the latest value against the value `periods` back:
/// `(v[t] - v[t-periods]) / v[t-periods]`.
///
/// Returns `None` when fewer than `periods + 1` values exist, or when the
/// base value is zero or non-finite (the change is undefined in that case).
pub fn relative_change(values: &[f64], periods: usize) -> Option<f64> {
    if periods == 0 || values.len() < periods + 1 {
        return None;
    }
    let latest = values[values.len() - 1];
    let base = values[values.len() - 1 - periods];
    if base == 0.0 || !base.is_finite() || !latest.is_finite() {
        return None;
    }
    Some((latest - base) / base)
}

/// Round to `decimals` decimal places.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
