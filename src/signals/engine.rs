//! Evaluation engine tying the indicator bundle to the strategy layer.

use futures_util::future::join_all;
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::indicators::IndicatorEngine;
use crate::models::candle::Candle;
use crate::models::signal::{EvalContext, TradeSignal};
use crate::models::snapshot::{MarketMeta, MarketSnapshot};
use crate::strategies::Strategy;

/// One market's raw inputs for a batch evaluation.
#[derive(Debug, Clone)]
pub struct MarketInput {
    pub market: MarketMeta,
    pub candles: Vec<Candle>,
    pub mark_price: f64,
}

pub struct SignalEngine;

impl SignalEngine {
    /// Build the indicator bundle for one market.
    pub fn snapshot(
        market: MarketMeta,
        candles: &[Candle],
        mark_price: f64,
        config: &Config,
    ) -> MarketSnapshot {
        IndicatorEngine::build(market, candles, mark_price, config)
    }

    /// Evaluate one market with the given strategy.
    pub async fn evaluate(
        strategy: &dyn Strategy,
        snapshot: &MarketSnapshot,
        sizing: f64,
        fee_rate: f64,
        ctx: &EvalContext,
    ) -> Option<TradeSignal> {
        strategy.analyze(snapshot, sizing, fee_rate, ctx).await
    }

    /// Evaluate a batch of markets in parallel.
    ///
    /// Each market runs in its own task; a panic or fault in one market
    /// resolves that slot to `None` and leaves the rest untouched. Result
    /// order matches input order.
    pub async fn evaluate_markets(
        strategy: Arc<dyn Strategy>,
        inputs: Vec<MarketInput>,
        sizing: f64,
        fee_rate: f64,
        ctx: EvalContext,
        config: &Config,
    ) -> Vec<Option<TradeSignal>> {
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|input| {
                let strategy = Arc::clone(&strategy);
                let ctx = ctx.clone();
                let config = config.clone();
                tokio::spawn(async move {
                    let snapshot = IndicatorEngine::build(
                        input.market,
                        &input.candles,
                        input.mark_price,
                        &config,
                    );
                    strategy.analyze(&snapshot, sizing, fee_rate, &ctx).await
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(signal) => signal,
                Err(error) => {
                    warn!(%error, "market evaluation task failed");
                    None
                }
            })
            .collect()
    }
}
