//! EMA (Exponential Moving Average) series and cross detection

use crate::indicators::math;
use crate::models::candle::Candle;
use crate::models::snapshot::{CrossKind, EmaCross};

/// Latest EMA of the closes for a period.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema(&closes, period)
}

/// Full EMA series over the closes; result index `i` corresponds to candle
/// `i + period - 1`.
pub fn ema_series(candles: &[Candle], period: usize) -> Vec<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema_series(&closes, period)
}

/// Scan the fast/slow EMA series backward from the most recent pair and
/// report the most recent crossing: fast transitioning from at-or-below to
/// above the slow series (golden) or from at-or-above to below (death).
///
/// `index` is the candle index where the crossing completed; `candles_ago`
/// counts back from the latest candle. Returns `None` when either series is
/// too short or no crossing exists in the window.
pub fn detect_ema_cross(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
) -> Option<EmaCross> {
    let fast = ema_series(candles, fast_period);
    let slow = ema_series(candles, slow_period);

    let overlap = fast.len().min(slow.len());
    if overlap < 2 {
        return None;
    }
    let fast = &fast[fast.len() - overlap..];
    let slow = &slow[slow.len() - overlap..];
    let last_candle = candles.len() - 1;

    for j in (1..overlap).rev() {
        let candles_ago = overlap - 1 - j;
        let kind = if fast[j - 1] <= slow[j - 1] && fast[j] > slow[j] {
            Some(CrossKind::Golden)
        } else if fast[j - 1] >= slow[j - 1] && fast[j] < slow[j] {
            Some(CrossKind::Death)
        } else {
            None
        };
        if let Some(kind) = kind {
            return Some(EmaCross {
                kind,
                index: last_candle - candles_ago,
                candles_ago,
            });
        }
    }

    None
}
