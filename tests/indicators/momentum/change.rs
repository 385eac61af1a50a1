//! Unit tests for the period-over-period return indicator

use chrono::{DateTime, Utc};
use trendsift::indicators::momentum::calculate_return;
use trendsift::models::Bar;

fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let timestamp: DateTime<Utc> =
                DateTime::from_timestamp(1_700_000_000 + i as i64 * 86_400, 0).unwrap();
            Bar::new(timestamp, close)
        })
        .collect()
}

#[test]
fn test_return_one_period() {
    let bars = make_bars(&[10.0, 10.5]);
    let ret = calculate_return(&bars, 1).unwrap();
    assert_eq!(ret.periods, 1);
    assert!((ret.value - 0.05).abs() < 1e-12);
}

#[test]
fn test_return_five_periods_back() {
    // Latest close 10.6 against 10.0 five trading days earlier.
    let bars = make_bars(&[9.9, 9.8, 10.0, 10.2, 10.1, 10.3, 10.5, 10.6]);
    let ret = calculate_return(&bars, 5).unwrap();
    assert!((ret.value - 0.06).abs() < 1e-12);
}

#[test]
fn test_return_insufficient_data() {
    let bars = make_bars(&[10.0, 10.5]);
    assert!(calculate_return(&bars, 5).is_none());
}

#[test]
fn test_return_exactly_lookback_plus_one() {
    let bars = make_bars(&[10.0, 10.1, 10.2, 10.3, 10.4, 10.6]);
    let ret = calculate_return(&bars, 5).unwrap();
    assert!((ret.value - 0.06).abs() < 1e-12);
}
