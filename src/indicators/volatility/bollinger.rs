//! Bollinger Bands indicator
//!
//! Middle Band = SMA(period)
//! Upper Band = Middle + (std_dev * standard deviation)
//! Lower Band = Middle - (std_dev * standard deviation)

use crate::indicators::math;
use crate::models::candle::Candle;
use crate::models::snapshot::BollingerSnapshot;

pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: usize,
    std_dev: f64,
) -> Option<BollingerSnapshot> {
    if candles.len() < period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma(&closes, period)?;
    let deviation = math::standard_deviation(&closes, period)?;

    Some(BollingerSnapshot {
        upper: middle + std_dev * deviation,
        middle,
        lower: middle - std_dev * deviation,
    })
}
