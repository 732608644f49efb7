//! ATR (Average True Range) indicator

use crate::indicators::math;
use crate::models::candle::Candle;

/// Calculate ATR with Wilder's smoothing.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let mut tr_values = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        tr_values.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }

    let mut atr = tr_values[..period].iter().sum::<f64>() / period as f64;
    for tr in &tr_values[period..] {
        atr = (atr * (period as f64 - 1.0) + tr) / period as f64;
    }
    Some(atr)
}
