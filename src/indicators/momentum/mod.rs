//! Momentum indicators: RSI, MACD, stochastic, wave oscillator

pub mod macd;
pub mod rsi;
pub mod stochastic;
pub mod wavetrend;

pub use macd::*;
pub use rsi::*;
pub use stochastic::*;
pub use wavetrend::*;
