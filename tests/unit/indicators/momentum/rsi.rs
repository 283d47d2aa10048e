//! Unit tests for RSI indicator

use tickerwatch::indicators::momentum::rsi::*;

use crate::support::{flat_series, series_from_closes};

const CLOSES: [f64; 10] = [
    44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
];

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_rsi_wilder_reference_values() {
    let rsi = rsi_series(&CLOSES, 3);
    assert_eq!(rsi.len(), CLOSES.len());
    assert!(rsi[..3].iter().all(|v| v.is_nan()));

    let expected = [
        7.058823529411242,
        59.06735751295326,
        74.1407528641571,
        80.08194138039714,
        85.85813381069593,
        90.99779218004419,
        93.13603040999183,
    ];
    for (actual, expected) in rsi[3..].iter().zip(expected) {
        assert_close(*actual, expected);
    }
}

#[test]
fn test_rsi_short_series_is_undefined() {
    for len in 0..14 {
        let series = flat_series(len, 100.0, 1.0);
        let rsi = calculate_rsi(&series, 14);
        assert_eq!(rsi.len(), len);
        assert!(rsi.iter().all(|v| v.is_nan()), "len {len}");
    }
}

#[test]
fn test_rsi_first_value_needs_period_plus_one_bars() {
    assert_eq!(rsi_min_bars(14), 15);

    let closes: Vec<f64> = (0..15).map(|i| 100.0 + (i % 4) as f64).collect();
    let rsi = rsi_series(&closes, 14);
    assert!(rsi[..14].iter().all(|v| v.is_nan()));
    assert!(rsi[14].is_finite());
}

#[test]
fn test_rsi_pins_to_100_without_losses() {
    let rising: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
    let rsi = calculate_rsi(&series_from_closes(&rising, 1.0), 14);
    assert!(rsi[14..].iter().all(|&v| v == 100.0));

    let flat = calculate_rsi(&flat_series(30, 100.0, 1.0), 14);
    assert!(flat[14..].iter().all(|&v| v == 100.0));
}

#[test]
fn test_rsi_zero_when_only_losses() {
    let falling: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
    let rsi = rsi_series(&falling, 14);
    assert!(rsi[14..].iter().all(|&v| v == 0.0));
}

#[test]
fn test_rsi_stays_in_range() {
    let closes: Vec<f64> = (0..200)
        .map(|i| 100.0 + 10.0 * ((i as f64) * 0.37).sin())
        .collect();
    let rsi = rsi_series(&closes, 14);
    assert!(rsi[14..].iter().all(|&v| (0.0..=100.0).contains(&v)));
}

#[test]
fn test_rsi_zero_period_is_undefined() {
    assert!(rsi_series(&CLOSES, 0).iter().all(|v| v.is_nan()));
}
