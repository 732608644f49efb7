use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed time bucket.
///
/// Candles arrive time-ordered ascending and are never mutated after
/// retrieval. `start` is the bucket open time, `timestamp` the bucket close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_volume: Option<f64>,
    pub start: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            quote_volume: None,
            start: timestamp,
            timestamp,
        }
    }

    pub fn with_quote_volume(mut self, quote_volume: f64) -> Self {
        self.quote_volume = Some(quote_volume);
        self
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }

    /// Typical price, the reference used by VWAP and money-flow math.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// High-low spread for the variance trend series.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Open-close delta for the price trend series.
    pub fn body(&self) -> f64 {
        self.open - self.close
    }
}
