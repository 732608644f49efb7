//! ADX (Average Directional Index) indicator
//!
//! Wilder-smoothed directional movement, kept as full series so the
//! previous DI samples and an average of the ADX itself are available to
//! the strategy layer.

use crate::indicators::math;
use crate::models::candle::Candle;
use crate::models::snapshot::AdxSnapshot;

/// Calculate ADX with DI+/DI− and an EMA over the ADX series.
///
/// Requires roughly two periods of history before the first ADX value
/// exists; shorter input yields `None`.
pub fn calculate_adx(
    candles: &[Candle],
    period: usize,
    average_length: usize,
) -> Option<AdxSnapshot> {
    if period == 0 || candles.len() < 2 * period + 1 {
        return None;
    }

    let mut tr_values = Vec::with_capacity(candles.len() - 1);
    let mut plus_dm_values = Vec::with_capacity(candles.len() - 1);
    let mut minus_dm_values = Vec::with_capacity(candles.len() - 1);

    for i in 1..candles.len() {
        tr_values.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));

        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;
        plus_dm_values.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm_values.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    let smoothed_tr = wilder_sum_series(&tr_values, period);
    let smoothed_plus = wilder_sum_series(&plus_dm_values, period);
    let smoothed_minus = wilder_sum_series(&minus_dm_values, period);

    let mut plus_di_series = Vec::with_capacity(smoothed_tr.len());
    let mut minus_di_series = Vec::with_capacity(smoothed_tr.len());
    let mut dx_series = Vec::with_capacity(smoothed_tr.len());
    for i in 0..smoothed_tr.len() {
        let (plus_di, minus_di) = if smoothed_tr[i] > 0.0 {
            (
                100.0 * smoothed_plus[i] / smoothed_tr[i],
                100.0 * smoothed_minus[i] / smoothed_tr[i],
            )
        } else {
            (0.0, 0.0)
        };
        plus_di_series.push(plus_di);
        minus_di_series.push(minus_di);

        let di_sum = plus_di + minus_di;
        dx_series.push(if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        });
    }

    if dx_series.len() < period {
        return None;
    }

    // ADX is Wilder's average of DX
    let mut adx_series = Vec::with_capacity(dx_series.len() - period + 1);
    let mut adx = dx_series[..period].iter().sum::<f64>() / period as f64;
    adx_series.push(adx);
    for dx in &dx_series[period..] {
        adx = (adx * (period as f64 - 1.0) + dx) / period as f64;
        adx_series.push(adx);
    }

    let len = plus_di_series.len();
    Some(AdxSnapshot {
        value: *adx_series.last()?,
        plus_di: plus_di_series[len - 1],
        minus_di: minus_di_series[len - 1],
        adx_ema: math::ema(&adx_series, average_length),
        prev_plus_di: (len >= 2).then(|| plus_di_series[len - 2]),
        prev_minus_di: (len >= 2).then(|| minus_di_series[len - 2]),
    })
}

/// Wilder's smoothed running sum: seeded with the plain sum of the first
/// `period` samples, then `s − s/period + x` per step.
fn wilder_sum_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.len() < period {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - period + 1);
    let mut current: f64 = values[..period].iter().sum();
    out.push(current);
    for value in &values[period..] {
        current = current - current / period as f64 + value;
        out.push(current);
    }
    out
}
