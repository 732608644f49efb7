//! Wave-oscillator momentum
//!
//! EMA channel over typical price: esa = EMA(tp), d = EMA(|tp − esa|),
//! ci = (tp − esa) / (0.015·d), wave = EMA(ci), signal = SMA(wave, 4).
//! A reversal pulse is the wave crossing its signal line on the latest
//! sample pair; pulse strength is the depth of the signal line there.

use crate::indicators::math;
use crate::indicators::momentum::rsi;
use crate::models::candle::Candle;
use crate::models::snapshot::{MomentumBias, MomentumSnapshot, PulseColor, ReversalPulse};

const SIGNAL_SMOOTHING: usize = 4;
const CHANNEL_SCALE: f64 = 0.015;
const OSCILLATOR_RSI_PERIOD: usize = 14;

pub fn calculate_wavetrend(
    candles: &[Candle],
    channel_length: usize,
    average_length: usize,
) -> Option<MomentumSnapshot> {
    if channel_length == 0 || candles.len() < channel_length {
        return None;
    }

    let typical: Vec<f64> = candles.iter().map(|c| c.typical_price()).collect();
    let esa_series = math::ema_series(&typical, channel_length);

    // |tp − esa| aligned to the esa series
    let offset = typical.len() - esa_series.len();
    let deviations: Vec<f64> = esa_series
        .iter()
        .enumerate()
        .map(|(i, esa)| (typical[i + offset] - esa).abs())
        .collect();
    let d_series = math::ema_series(&deviations, channel_length);

    let ci_offset = esa_series.len() - d_series.len();
    let ci_series: Vec<f64> = d_series
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let spread = typical[i + ci_offset + offset] - esa_series[i + ci_offset];
            if *d > 0.0 {
                spread / (CHANNEL_SCALE * d)
            } else {
                0.0
            }
        })
        .collect();

    let wave_series = math::ema_series(&ci_series, average_length);
    let signal_series = math::sma_series(&wave_series, SIGNAL_SMOOTHING);
    if signal_series.is_empty() {
        return None;
    }

    let wave_len = wave_series.len();
    let signal_len = signal_series.len();
    let value = wave_series[wave_len - 1];
    let signal = signal_series[signal_len - 1];

    let bias = if value > signal {
        MomentumBias::Bullish
    } else if value < signal {
        MomentumBias::Bearish
    } else {
        MomentumBias::Flat
    };

    let reversal = if wave_len >= 2 && signal_len >= 2 {
        let prev_value = wave_series[wave_len - 2];
        let prev_signal = signal_series[signal_len - 2];
        if prev_value <= prev_signal && value > signal {
            Some(ReversalPulse {
                color: PulseColor::Green,
                strength: signal.abs(),
            })
        } else if prev_value >= prev_signal && value < signal {
            Some(ReversalPulse {
                color: PulseColor::Red,
                strength: signal.abs(),
            })
        } else {
            None
        }
    } else {
        None
    };

    Some(MomentumSnapshot {
        value,
        signal,
        rsi: rsi::rsi_series(&wave_series, OSCILLATOR_RSI_PERIOD)
            .last()
            .copied(),
        bias,
        reversal,
    })
}
