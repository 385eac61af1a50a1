//! Unit tests for per-symbol evaluation

use chrono::{DateTime, Utc};
use trendsift::models::Bar;
use trendsift::screener::engine::{evaluate, SymbolOutcome};

fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let timestamp: DateTime<Utc> =
                DateTime::from_timestamp(1_700_000_000 + i as i64 * 300, 0).unwrap();
            Bar::new(timestamp, close)
        })
        .collect()
}

#[test]
fn test_empty_series_is_no_data() {
    assert_eq!(evaluate("PETR4.SA", &[], 7, 1), SymbolOutcome::NoData);
}

#[test]
fn test_short_series_is_insufficient_history() {
    let bars = make_bars(&[10.0, 10.2, 10.1]);
    assert_eq!(
        evaluate("PETR4.SA", &bars, 7, 1),
        SymbolOutcome::InsufficientHistory { samples: 3 }
    );
}

#[test]
fn test_series_long_enough_for_sma_but_not_lookback() {
    let bars = make_bars(&[10.0, 10.2, 10.1, 10.3, 10.5, 10.4, 10.6]);
    assert_eq!(
        evaluate("PETR4.SA", &bars, 7, 7),
        SymbolOutcome::InsufficientHistory { samples: 7 }
    );
}

#[test]
fn test_uptrend_symbol_is_evaluated() {
    let bars = make_bars(&[10.0, 10.2, 10.1, 10.3, 10.5, 10.4, 10.6]);
    match evaluate("PETR4.SA", &bars, 7, 1) {
        SymbolOutcome::Evaluated(ind) => {
            assert_eq!(ind.symbol, "PETR4.SA");
            assert_eq!(ind.close, 10.6);
            assert!((ind.sma - 10.3).abs() < 1e-9);
            assert!((ind.ret - (10.6 - 10.4) / 10.4).abs() < 1e-12);
            assert!(ind.qualifies());
        }
        other => panic!("expected Evaluated, got {:?}", other),
    }
}

#[test]
fn test_downtrend_symbol_does_not_qualify() {
    let bars = make_bars(&[11.0, 11.2, 11.1, 11.0, 10.8, 10.7, 10.2]);
    match evaluate("BBDC4.SA", &bars, 7, 1) {
        SymbolOutcome::Evaluated(ind) => {
            assert!(ind.close < ind.sma);
            assert!(!ind.qualifies());
        }
        other => panic!("expected Evaluated, got {:?}", other),
    }
}

#[test]
fn test_indicators_are_unrounded() {
    // 7 closes averaging 10.114285..; the engine must keep full precision.
    let bars = make_bars(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.8]);
    match evaluate("CMIG4.SA", &bars, 7, 1) {
        SymbolOutcome::Evaluated(ind) => {
            assert!((ind.sma - 70.8 / 7.0).abs() < 1e-12);
            assert_ne!(ind.sma, 10.11);
        }
        other => panic!("expected Evaluated, got {:?}", other),
    }
}
