//! Unit tests for the VWAP band calculator

use chrono::DateTime;
use signatrix::indicators::volume::calculate_vwap_bands;
use signatrix::models::candle::Candle;

fn candle(high: f64, low: f64, close: f64, volume: f64, index: i64) -> Candle {
    let timestamp = DateTime::from_timestamp(1_700_000_000 + index * 60, 0).unwrap();
    Candle::new(close, high, low, close, volume, timestamp)
}

#[test]
fn test_hand_computed_bands() {
    // typical prices 8 and 10 at equal volume: vwap 9, weighted σ 1
    let candles = vec![candle(10.0, 6.0, 8.0, 2.0, 0), candle(12.0, 8.0, 10.0, 2.0, 1)];
    let bands = calculate_vwap_bands(&candles).unwrap();

    assert!((bands.value - 9.0).abs() < 1e-9);
    assert!((bands.std_dev - 1.0).abs() < 1e-9);
    assert_eq!(bands.upper.len(), 3);
    assert_eq!(bands.lower.len(), 3);
    assert!((bands.upper[0] - 10.0).abs() < 1e-9);
    assert!((bands.upper[2] - 12.0).abs() < 1e-9);
    assert!((bands.lower[0] - 8.0).abs() < 1e-9);
    assert!((bands.lower[2] - 6.0).abs() < 1e-9);
}

#[test]
fn test_band_symmetry() {
    let candles: Vec<Candle> = (0..60)
        .map(|i| {
            let base = 50.0 + (i as f64 * 0.7).sin() * 5.0;
            candle(base + 1.5, base - 1.0, base, 100.0 + (i % 7) as f64 * 13.0, i)
        })
        .collect();
    let bands = calculate_vwap_bands(&candles).unwrap();

    for i in 0..3 {
        let above = bands.upper[i] - bands.value;
        let below = bands.value - bands.lower[i];
        assert!((above - below).abs() < 1e-9);
    }
}

#[test]
fn test_zero_volume_guard() {
    let candles = vec![candle(10.0, 6.0, 8.0, 0.0, 0), candle(12.0, 8.0, 10.0, 0.0, 1)];
    assert!(calculate_vwap_bands(&candles).is_none());
}

#[test]
fn test_empty_input() {
    assert!(calculate_vwap_bands(&[]).is_none());
}

#[test]
fn test_uniform_price_collapses_bands() {
    let candles: Vec<Candle> = (0..10).map(|i| candle(9.0, 9.0, 9.0, 5.0, i)).collect();
    let bands = calculate_vwap_bands(&candles).unwrap();
    assert!((bands.value - 9.0).abs() < 1e-9);
    assert_eq!(bands.std_dev, 0.0);
    assert!(bands.upper.iter().all(|b| (b - 9.0).abs() < 1e-9));
}
