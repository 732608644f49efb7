//! Volume indicators: VWAP bands, money flow

pub mod money_flow;
pub mod vwap;

pub use money_flow::*;
pub use vwap::*;
