//! Stochastic oscillator
//!
//! Raw %K = (close − lowest low) / (highest high − lowest low) · 100 over
//! the lookback window, smoothed, with %D an SMA of smoothed %K.

use crate::indicators::math;
use crate::models::candle::Candle;
use crate::models::snapshot::StochasticSnapshot;

pub fn calculate_stochastic(
    candles: &[Candle],
    period: usize,
    smoothing: usize,
) -> Option<StochasticSnapshot> {
    if period == 0 || candles.len() < period {
        return None;
    }

    let mut raw_k = Vec::with_capacity(candles.len() - period + 1);
    for i in period - 1..candles.len() {
        let window = &candles[i + 1 - period..=i];
        let lowest = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let highest = window
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let range = highest - lowest;
        raw_k.push(if range > 0.0 {
            (candles[i].close - lowest) / range * 100.0
        } else {
            50.0
        });
    }

    let k_series = math::sma_series(&raw_k, smoothing);
    let d_series = math::sma_series(&k_series, smoothing);
    if d_series.is_empty() {
        return None;
    }

    let k_len = k_series.len();
    let d_len = d_series.len();
    Some(StochasticSnapshot {
        k: k_series[k_len - 1],
        d: d_series[d_len - 1],
        prev_k: (k_len >= 2).then(|| k_series[k_len - 2]),
        prev_d: (d_len >= 2).then(|| d_series[d_len - 2]),
    })
}
