//! Indicator engine: candle window in, `MarketSnapshot` out.

use chrono::Utc;
use tracing::debug;

use crate::config::Config;
use crate::indicators::{momentum, trend, volatility, volume};
use crate::models::candle::Candle;
use crate::models::snapshot::{MarketMeta, MarketSnapshot};

const WAVETREND_CHANNEL_LENGTH: usize = 10;
const WAVETREND_AVERAGE_LENGTH: usize = 21;
const MFI_PERIOD: usize = 14;
const CHAIKIN_FLOW_PERIOD: usize = 20;

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Derive the full indicator bundle for one market.
    ///
    /// Short candle windows degrade field by field: whatever an indicator
    /// cannot compute stays `None` (or an empty history), and the snapshot
    /// is still returned. Strategies decide whether what remains is enough.
    pub fn build(
        market: MarketMeta,
        candles: &[Candle],
        mark_price: f64,
        config: &Config,
    ) -> MarketSnapshot {
        let timestamp = candles
            .last()
            .map(|c| c.timestamp)
            .unwrap_or_else(Utc::now);
        let mut snapshot = MarketSnapshot::empty(market, mark_price, timestamp);

        snapshot.ema_fast = trend::calculate_ema(candles, config.ema_fast_period);
        snapshot.ema_slow = trend::calculate_ema(candles, config.ema_slow_period);
        snapshot.ema_cross =
            trend::detect_ema_cross(candles, config.ema_fast_period, config.ema_slow_period);

        snapshot.rsi_history = momentum::calculate_rsi_history(candles, config.rsi_period);
        snapshot.rsi = snapshot.rsi_history.last().copied();
        snapshot.macd = momentum::calculate_macd(
            candles,
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        );
        snapshot.stochastic = momentum::calculate_stochastic(
            candles,
            config.stochastic_period,
            config.stochastic_smoothing,
        );
        snapshot.momentum = momentum::calculate_wavetrend(
            candles,
            WAVETREND_CHANNEL_LENGTH,
            WAVETREND_AVERAGE_LENGTH,
        );

        snapshot.bollinger = volatility::calculate_bollinger_bands(
            candles,
            config.bollinger_period,
            config.bollinger_std_dev,
        );
        snapshot.atr = volatility::calculate_atr(candles, config.atr_period);

        snapshot.adx =
            trend::calculate_adx(candles, config.adx_period, config.adx_average_length);

        snapshot.volume_trend = trend::volume_trend(candles);
        snapshot.variance_trend = trend::variance_trend(candles);
        snapshot.price_trend = trend::price_trend(candles);

        snapshot.vwap = volume::calculate_vwap_bands(candles);
        snapshot.money_flow =
            volume::calculate_money_flow(candles, MFI_PERIOD, CHAIKIN_FLOW_PERIOD);

        if snapshot.vwap.is_none() || snapshot.macd.is_none() {
            debug!(
                market = %snapshot.market.symbol,
                candles = candles.len(),
                "snapshot degraded: candle window too short for full bundle"
            );
        }

        snapshot
    }
}
