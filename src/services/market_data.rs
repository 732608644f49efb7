//! Market data provider interface for data source integration.

use async_trait::async_trait;

use crate::models::candle::Candle;
use crate::services::ServiceError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get up to `count` historical candles for a symbol, oldest first.
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        count: usize,
    ) -> Result<Vec<Candle>, ServiceError>;

    /// Get the current mark price for a symbol.
    async fn get_mark_price(&self, symbol: &str) -> Result<f64, ServiceError>;
}

pub struct PlaceholderMarketDataProvider;

#[async_trait]
impl MarketDataProvider for PlaceholderMarketDataProvider {
    async fn get_candles(
        &self,
        _symbol: &str,
        _timeframe: &str,
        _count: usize,
    ) -> Result<Vec<Candle>, ServiceError> {
        Ok(Vec::new())
    }

    async fn get_mark_price(&self, _symbol: &str) -> Result<f64, ServiceError> {
        Ok(0.0)
    }
}
