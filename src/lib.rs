//! signatrix: decision core of an automated trading-signal engine.
//!
//! A rolling candle window goes in, an indicator bundle
//! ([`models::MarketSnapshot`]) comes out of the indicator engine, and one
//! of the pluggable strategy variants turns that bundle into a
//! [`models::TradeSignal`] (or abstains). Candle retrieval, account state
//! and order execution live behind the collaborator traits in
//! [`services`]; the core itself holds no state between evaluations.

pub mod config;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;
