//! Per-cycle indicator bundle consumed by the strategy layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exchange metadata for one market: price/quantity precision and lot rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMeta {
    pub symbol: String,
    pub tick_size: f64,
    pub step_size: f64,
    pub decimal_price: u32,
    pub decimal_quantity: u32,
}

impl MarketMeta {
    pub fn new(symbol: impl Into<String>, decimal_price: u32, decimal_quantity: u32) -> Self {
        let decimal_price_f = 10f64.powi(decimal_price as i32);
        let decimal_quantity_f = 10f64.powi(decimal_quantity as i32);
        Self {
            symbol: symbol.into(),
            tick_size: 1.0 / decimal_price_f,
            step_size: 1.0 / decimal_quantity_f,
            decimal_price,
            decimal_quantity,
        }
    }

    pub fn round_price(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimal_price as i32);
        (value * scale).round() / scale
    }

    pub fn round_quantity(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimal_quantity as i32);
        (value * scale).round() / scale
    }
}

/// Direction of the most recent fast/slow EMA crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossKind {
    Golden,
    Death,
}

/// Most recent fast/slow EMA crossing in the available window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaCross {
    pub kind: CrossKind,
    /// Candle index (into the evaluated window) where the crossing completed.
    pub index: usize,
    /// How many candles ago the crossing occurred (0 = most recent candle).
    pub candles_ago: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdSnapshot {
    pub macd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<f64>,
    pub histogram: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_histogram: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerSnapshot {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdxSnapshot {
    pub value: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    /// EMA of the ADX series itself, used as the trend-strength reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx_ema: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_plus_di: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_minus_di: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticSnapshot {
    pub k: f64,
    pub d: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_d: Option<f64>,
}

/// Slope sign of an ordinary-least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    Increasing,
    Decreasing,
    Flat,
}

/// Linear-trend fit over one derived candle series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendRegression {
    pub slope: f64,
    pub intercept: f64,
    /// Value the fitted line projects one step past the window.
    pub forecast: f64,
    pub label: TrendLabel,
}

/// Classical VWAP with standard-deviation bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VwapBands {
    pub value: f64,
    pub std_dev: f64,
    /// `value + {1,2,3}·σ`, nearest band first.
    pub upper: Vec<f64>,
    /// `value − {1,2,3}·σ`, nearest band first.
    pub lower: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PulseColor {
    Green,
    Red,
}

/// Oscillator crossing detected on the latest sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReversalPulse {
    pub color: PulseColor,
    /// Depth of the signal line at the crossing sample.
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumBias {
    Bullish,
    Bearish,
    Flat,
}

/// Wave-oscillator momentum reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    pub value: f64,
    pub signal: f64,
    /// RSI computed over the oscillator series, not over price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    pub bias: MomentumBias,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversal: Option<ReversalPulse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneyFlowSnapshot {
    /// Money Flow Index, 0..100.
    pub mfi: f64,
    /// Signed money-flow strength, negative when flow is distributive.
    pub value: f64,
}

/// The full indicator bundle computed for one market at one evaluation
/// instant. Produced once per cycle by the indicator engine and never
/// mutated by strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market: MarketMeta,
    pub mark_price: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_fast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_slow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_cross: Option<EmaCross>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub rsi_history: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<AdxSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stochastic: Option<StochasticSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_trend: Option<TrendRegression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance_trend: Option<TrendRegression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_trend: Option<TrendRegression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<VwapBands>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub momentum: Option<MomentumSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money_flow: Option<MoneyFlowSnapshot>,
}

impl MarketSnapshot {
    /// Empty snapshot: every indicator absent, only market identity and the
    /// current mark price filled in. The engine populates whatever the
    /// candle window supports.
    pub fn empty(market: MarketMeta, mark_price: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            market,
            mark_price,
            timestamp,
            ema_fast: None,
            ema_slow: None,
            ema_cross: None,
            rsi: None,
            rsi_history: Vec::new(),
            macd: None,
            bollinger: None,
            adx: None,
            stochastic: None,
            atr: None,
            volume_trend: None,
            variance_trend: None,
            price_trend: None,
            vwap: None,
            momentum: None,
            money_flow: None,
        }
    }
}
