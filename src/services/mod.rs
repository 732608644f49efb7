//! External collaborator contracts.
//!
//! The decision core never talks to an exchange itself; these traits are
//! the seams the host wires real providers into. Placeholder
//! implementations exist for tests and dry wiring.

pub mod account;
pub mod execution;
pub mod market_data;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("market data error: {0}")]
    MarketData(String),
    #[error("order rejected: {0}")]
    OrderRejected(String),
}

pub use account::{AccountProvider, StaticAccountProvider};
pub use execution::{DryRunExecutor, OrderAck, OrderExecutor, OrderRequest};
pub use market_data::{MarketDataProvider, PlaceholderMarketDataProvider};
