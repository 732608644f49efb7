//! Unit tests for the linear-trend regression

use chrono::DateTime;
use signatrix::indicators::trend::{linear_trend, price_trend, variance_trend, volume_trend};
use signatrix::models::candle::Candle;
use signatrix::models::snapshot::TrendLabel;

fn candle(open: f64, high: f64, low: f64, close: f64, volume: f64, index: i64) -> Candle {
    let timestamp = DateTime::from_timestamp(1_700_000_000 + index * 60, 0).unwrap();
    Candle::new(open, high, low, close, volume, timestamp)
}

#[test]
fn test_exact_line_fit() {
    // y = 2x + 1
    let values = [1.0, 3.0, 5.0, 7.0, 9.0];
    let fit = linear_trend(&values).unwrap();
    assert!((fit.slope - 2.0).abs() < 1e-9);
    assert!((fit.intercept - 1.0).abs() < 1e-9);
    assert!((fit.forecast - 11.0).abs() < 1e-9);
    assert_eq!(fit.label, TrendLabel::Increasing);
}

#[test]
fn test_decreasing_label() {
    let values = [9.0, 7.0, 5.0, 3.0];
    let fit = linear_trend(&values).unwrap();
    assert!(fit.slope < 0.0);
    assert_eq!(fit.label, TrendLabel::Decreasing);
}

#[test]
fn test_flat_series() {
    let values = [5.0, 5.0, 5.0, 5.0, 5.0];
    let fit = linear_trend(&values).unwrap();
    assert_eq!(fit.slope, 0.0);
    assert_eq!(fit.label, TrendLabel::Flat);
    assert!((fit.forecast - 5.0).abs() < 1e-9);
}

#[test]
fn test_insufficient_data() {
    assert!(linear_trend(&[1.0]).is_none());
    assert!(linear_trend(&[]).is_none());
}

#[test]
fn test_candle_series_extraction() {
    // volume rises, range widens, bodies grow more bearish
    let candles: Vec<Candle> = (0..10)
        .map(|i| {
            let base = 100.0;
            candle(
                base + i as f64 * 0.1,
                base + 1.0 + i as f64 * 0.2,
                base - 1.0,
                base,
                1_000.0 + i as f64 * 50.0,
                i,
            )
        })
        .collect();

    assert_eq!(
        volume_trend(&candles).unwrap().label,
        TrendLabel::Increasing
    );
    assert_eq!(
        variance_trend(&candles).unwrap().label,
        TrendLabel::Increasing
    );
    // open − close grows with i, so the body series trends up
    assert_eq!(price_trend(&candles).unwrap().label, TrendLabel::Increasing);
}

#[test]
fn test_determinism() {
    let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    assert_eq!(linear_trend(&values), linear_trend(&values));
}
