//! Shared data models spanning the engine layers.

pub mod candle;
pub mod signal;
pub mod snapshot;

pub use candle::Candle;
pub use signal::{
    ConfluenceTier, EvalContext, MarketTrend, SignalLevel, TradeAction, TradeSignal,
    ValidationResult,
};
pub use snapshot::{
    AdxSnapshot, BollingerSnapshot, CrossKind, EmaCross, MacdSnapshot, MarketMeta, MarketSnapshot,
    MomentumBias, MomentumSnapshot, MoneyFlowSnapshot, PulseColor, ReversalPulse,
    StochasticSnapshot, TrendLabel, TrendRegression, VwapBands,
};
