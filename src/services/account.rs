//! Account provider interface: leverage and market metadata lookup.

use async_trait::async_trait;

use crate::models::snapshot::MarketMeta;
use crate::services::ServiceError;

#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Current account leverage. Callers treat a failure as 1× rather than
    /// aborting evaluation.
    async fn get_leverage(&self) -> Result<f64, ServiceError>;

    /// Tradable markets with their precision rules.
    async fn get_markets(&self) -> Result<Vec<MarketMeta>, ServiceError>;
}

/// Fixed-answer provider for tests and single-account setups.
pub struct StaticAccountProvider {
    leverage: f64,
    markets: Vec<MarketMeta>,
}

impl StaticAccountProvider {
    pub fn new(leverage: f64) -> Self {
        Self {
            leverage,
            markets: Vec::new(),
        }
    }

    pub fn with_markets(mut self, markets: Vec<MarketMeta>) -> Self {
        self.markets = markets;
        self
    }
}

#[async_trait]
impl AccountProvider for StaticAccountProvider {
    async fn get_leverage(&self) -> Result<f64, ServiceError> {
        Ok(self.leverage)
    }

    async fn get_markets(&self) -> Result<Vec<MarketMeta>, ServiceError> {
        Ok(self.markets.clone())
    }
}
