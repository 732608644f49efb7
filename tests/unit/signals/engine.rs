//! Unit tests for the evaluation engine

use async_trait::async_trait;
use chrono::DateTime;
use std::sync::Arc;

use signatrix::config::Config;
use signatrix::models::candle::Candle;
use signatrix::models::signal::{EvalContext, TradeAction, TradeSignal};
use signatrix::models::snapshot::{MarketMeta, MarketSnapshot};
use signatrix::services::StaticAccountProvider;
use signatrix::signals::{MarketInput, SignalEngine};
use signatrix::strategies::{LevelStrategy, Strategy};

fn create_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 0.3;
            let timestamp = DateTime::from_timestamp(1_700_000_000 + i as i64 * 300, 0).unwrap();
            Candle::new(base, base + 0.6, base - 0.4, base + 0.2, 1_000.0, timestamp)
        })
        .collect()
}

fn input(symbol: &str) -> MarketInput {
    MarketInput {
        market: MarketMeta::new(symbol, 2, 3),
        candles: create_candles(60),
        mark_price: 110.0,
    }
}

fn context() -> EvalContext {
    EvalContext::new(Arc::new(StaticAccountProvider::new(1.0)))
}

/// Emits a fixed signal for every market except one it blows up on.
struct FaultySampleStrategy;

#[async_trait]
impl Strategy for FaultySampleStrategy {
    fn name(&self) -> &'static str {
        "faulty-sample"
    }

    async fn analyze(
        &self,
        snapshot: &MarketSnapshot,
        _sizing: f64,
        _fee_rate: f64,
        _ctx: &EvalContext,
    ) -> Option<TradeSignal> {
        if snapshot.market.symbol == "BAD" {
            panic!("simulated evaluation fault");
        }
        Some(TradeSignal {
            market: snapshot.market.symbol.clone(),
            action: TradeAction::Long,
            entry: 100.0,
            stop: 95.0,
            target: 105.0,
            targets: None,
            pnl: 40.0,
            risk: 50.0,
            signal_level: None,
            confluences: None,
            reason: None,
            order_id: None,
        })
    }
}

#[tokio::test]
async fn test_snapshot_and_single_evaluation() {
    let config = Config::default();
    let market_input = input("SOL");
    let snapshot = SignalEngine::snapshot(
        market_input.market.clone(),
        &market_input.candles,
        market_input.mark_price,
        &config,
    );
    assert_eq!(snapshot.market.symbol, "SOL");

    let signal = SignalEngine::evaluate(&LevelStrategy, &snapshot, 1_000.0, 0.001, &context()).await;
    assert!(signal.is_none());
}

#[tokio::test]
async fn test_batch_preserves_order() {
    let config = Config::default();
    let results = SignalEngine::evaluate_markets(
        Arc::new(FaultySampleStrategy),
        vec![input("SOL"), input("ETH"), input("DOGE")],
        1_000.0,
        0.001,
        context(),
        &config,
    )
    .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().market, "SOL");
    assert_eq!(results[1].as_ref().unwrap().market, "ETH");
    assert_eq!(results[2].as_ref().unwrap().market, "DOGE");
}

#[tokio::test]
async fn test_fault_in_one_market_isolated() {
    let config = Config::default();
    let results = SignalEngine::evaluate_markets(
        Arc::new(FaultySampleStrategy),
        vec![input("SOL"), input("BAD"), input("ETH")],
        1_000.0,
        0.001,
        context(),
        &config,
    )
    .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_some());
    assert!(results[1].is_none());
    assert!(results[2].is_some());
}

#[tokio::test]
async fn test_empty_batch() {
    let config = Config::default();
    let results = SignalEngine::evaluate_markets(
        Arc::new(LevelStrategy),
        Vec::new(),
        1_000.0,
        0.001,
        context(),
        &config,
    )
    .await;
    assert!(results.is_empty());
}
