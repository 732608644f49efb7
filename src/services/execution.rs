//! Order execution interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::signal::TradeAction;
use crate::services::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub market: String,
    pub action: TradeAction,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<f64>>,
    /// Quote-denominated position size.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: String,
}

#[async_trait]
pub trait OrderExecutor: Send + Sync {
    async fn submit(&self, request: &OrderRequest) -> Result<OrderAck, ServiceError>;
}

/// Accepts every order with a synthetic id; no exchange involved.
#[derive(Default)]
pub struct DryRunExecutor {
    sequence: AtomicU64,
}

#[async_trait]
impl OrderExecutor for DryRunExecutor {
    async fn submit(&self, request: &OrderRequest) -> Result<OrderAck, ServiceError> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        Ok(OrderAck {
            order_id: format!("dry-{}-{}", request.market, seq),
        })
    }
}
