//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(signal_period) of MACD
//! Histogram = MACD - Signal

use crate::indicators::math;
use crate::models::candle::Candle;
use crate::models::snapshot::MacdSnapshot;

/// Calculate MACD with the previous histogram sample retained.
///
/// When the window supports a MACD line but not yet a signal line, the
/// snapshot carries `signal: None` and the histogram degrades to the raw
/// MACD value so momentum rules can still read it.
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdSnapshot> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let fast_series = math::ema_series(&closes, fast_period);
    let slow_series = math::ema_series(&closes, slow_period);
    let overlap = fast_series.len().min(slow_series.len());
    if overlap == 0 {
        return None;
    }

    let macd_series: Vec<f64> = fast_series[fast_series.len() - overlap..]
        .iter()
        .zip(&slow_series[slow_series.len() - overlap..])
        .map(|(fast, slow)| fast - slow)
        .collect();
    let macd_line = *macd_series.last()?;

    let signal_series = math::ema_series(&macd_series, signal_period);
    if signal_series.is_empty() {
        let prev_histogram = (macd_series.len() >= 2).then(|| macd_series[macd_series.len() - 2]);
        return Some(MacdSnapshot {
            macd: macd_line,
            signal: None,
            histogram: macd_line,
            prev_histogram,
        });
    }

    let histogram_series: Vec<f64> = macd_series[macd_series.len() - signal_series.len()..]
        .iter()
        .zip(&signal_series)
        .map(|(macd, signal)| macd - signal)
        .collect();

    let len = histogram_series.len();
    Some(MacdSnapshot {
        macd: macd_line,
        signal: signal_series.last().copied(),
        histogram: histogram_series[len - 1],
        prev_histogram: (len >= 2).then(|| histogram_series[len - 2]),
    })
}
