//! Level strategy placeholder.
//!
//! Reserved name in the selector; always abstains until the level-based
//! rule set lands.

use async_trait::async_trait;

use crate::models::signal::{EvalContext, TradeSignal};
use crate::models::snapshot::MarketSnapshot;
use crate::strategies::Strategy;

#[derive(Default)]
pub struct LevelStrategy;

#[async_trait]
impl Strategy for LevelStrategy {
    fn name(&self) -> &'static str {
        "level"
    }

    async fn analyze(
        &self,
        _snapshot: &MarketSnapshot,
        _sizing: f64,
        _fee_rate: f64,
        _ctx: &EvalContext,
    ) -> Option<TradeSignal> {
        None
    }
}
