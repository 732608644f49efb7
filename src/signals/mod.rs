//! Signal evaluation interfaces.

pub mod engine;
pub mod heuristic;

pub use engine::{MarketInput, SignalEngine};
