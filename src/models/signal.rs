//! Decision outputs and the evaluation context handed to strategies.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::{AccountProvider, OrderExecutor};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Long,
    Short,
}

impl TradeAction {
    pub fn is_long(self) -> bool {
        matches!(self, TradeAction::Long)
    }
}

/// Broader-market directional context supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketTrend {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketTrend {
    /// Whether this trend agrees with the given trade direction. Neutral
    /// agrees with nothing.
    pub fn supports(self, action: TradeAction) -> bool {
        matches!(
            (self, action),
            (MarketTrend::Bullish, TradeAction::Long) | (MarketTrend::Bearish, TradeAction::Short)
        )
    }
}

/// Confidence tier derived from a confluence count of 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConfluenceTier {
    Bronze = 1,
    Silver = 2,
    Gold = 3,
    Diamond = 4,
}

impl ConfluenceTier {
    /// Map a confluence count onto a tier. Counts above four clamp to
    /// Diamond; zero or below clamp to Bronze.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 | 1 => ConfluenceTier::Bronze,
            2 => ConfluenceTier::Silver,
            3 => ConfluenceTier::Gold,
            _ => ConfluenceTier::Diamond,
        }
    }
}

/// Confidence label carried on a signal: confluence tiers for laddered
/// strategies, entry sub-classification for consensus strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalLevel {
    Bronze,
    Silver,
    Gold,
    Diamond,
    Perfect,
    Standard,
}

impl From<ConfluenceTier> for SignalLevel {
    fn from(tier: ConfluenceTier) -> Self {
        match tier {
            ConfluenceTier::Bronze => SignalLevel::Bronze,
            ConfluenceTier::Silver => SignalLevel::Silver,
            ConfluenceTier::Gold => SignalLevel::Gold,
            ConfluenceTier::Diamond => SignalLevel::Diamond,
        }
    }
}

/// Outcome of a confirmation filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ValidationResult {
    pub fn valid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            reason: reason.into(),
            details: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// The decision output: direction plus entry/stop/target prices and
/// projected pnl/risk for the given sizing and fee rate. Prices are rounded
/// to the market's declared precision before the signal leaves a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub market: String,
    pub action: TradeAction,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<f64>>,
    pub pnl: f64,
    pub risk: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_level: Option<SignalLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confluences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl TradeSignal {
    pub fn with_level(mut self, level: SignalLevel) -> Self {
        self.signal_level = Some(level);
        self
    }

    pub fn with_confluences(mut self, confluences: Vec<String>) -> Self {
        self.confluences = Some(confluences);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Everything a strategy needs from the outside world, passed explicitly so
/// evaluation stays a function of its arguments.
#[derive(Clone)]
pub struct EvalContext {
    pub account: Arc<dyn AccountProvider>,
    pub executor: Option<Arc<dyn OrderExecutor>>,
    pub broader_trend: MarketTrend,
    /// Symbol of the reference market driving the broader trend; the trend
    /// filter is skipped when evaluating that market itself.
    pub reference_symbol: String,
}

impl EvalContext {
    pub fn new(account: Arc<dyn AccountProvider>) -> Self {
        Self {
            account,
            executor: None,
            broader_trend: MarketTrend::Neutral,
            reference_symbol: String::new(),
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn OrderExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_broader_trend(mut self, trend: MarketTrend, reference_symbol: impl Into<String>) -> Self {
        self.broader_trend = trend;
        self.reference_symbol = reference_symbol.into();
        self
    }
}
