//! Trend indicators: EMA, ADX, linear regression

pub mod adx;
pub mod ema;
pub mod regression;

pub use adx::*;
pub use ema::*;
pub use regression::*;
