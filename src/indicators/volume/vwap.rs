//! Classical VWAP with standard-deviation bands
//!
//! Two passes: the first accumulates Σvolume and Σ(typical·volume) for the
//! volume-weighted average price, the second accumulates the
//! volume-weighted squared deviation of typical price from that average.
//! Bands sit at vwap ± {1,2,3}·σ.

use crate::models::candle::Candle;
use crate::models::snapshot::VwapBands;

const BAND_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 3.0];

pub fn calculate_vwap_bands(candles: &[Candle]) -> Option<VwapBands> {
    if candles.is_empty() {
        return None;
    }

    let mut total_volume = 0.0;
    let mut total_tpv = 0.0;
    for candle in candles {
        total_volume += candle.volume;
        total_tpv += candle.typical_price() * candle.volume;
    }
    if total_volume <= 0.0 {
        return None;
    }
    let vwap = total_tpv / total_volume;

    let mut weighted_squared_dev = 0.0;
    for candle in candles {
        let deviation = candle.typical_price() - vwap;
        weighted_squared_dev += deviation * deviation * candle.volume;
    }
    let std_dev = (weighted_squared_dev / total_volume).sqrt();

    Some(VwapBands {
        value: vwap,
        std_dev,
        upper: BAND_MULTIPLIERS.iter().map(|m| vwap + m * std_dev).collect(),
        lower: BAND_MULTIPLIERS.iter().map(|m| vwap - m * std_dev).collect(),
    })
}
