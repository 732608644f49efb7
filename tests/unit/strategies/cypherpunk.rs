//! Unit tests for the CypherPunk consensus strategy

use chrono::Utc;
use std::sync::Arc;

use signatrix::config::Config;
use signatrix::models::signal::{EvalContext, SignalLevel, TradeAction};
use signatrix::models::snapshot::{
    MarketMeta, MarketSnapshot, MomentumBias, MomentumSnapshot, MoneyFlowSnapshot, PulseColor,
    ReversalPulse, VwapBands,
};
use signatrix::services::StaticAccountProvider;
use signatrix::strategies::{CypherPunkStrategy, Strategy};

const SIZING: f64 = 1_000.0;
const FEE: f64 = 0.001;

fn context() -> EvalContext {
    EvalContext::new(Arc::new(StaticAccountProvider::new(1.0)))
}

fn strategy() -> CypherPunkStrategy {
    CypherPunkStrategy::new(&Config::default())
}

fn consensus_long_snapshot() -> MarketSnapshot {
    let mut snapshot = MarketSnapshot::empty(MarketMeta::new("SOL", 2, 3), 100.0, Utc::now());
    snapshot.vwap = Some(VwapBands {
        value: 98.0,
        std_dev: 2.0,
        upper: vec![100.0, 102.0, 104.0],
        lower: vec![96.0, 94.0, 92.0],
    });
    snapshot.momentum = Some(MomentumSnapshot {
        value: 5.0,
        signal: 3.0,
        rsi: Some(50.0),
        bias: MomentumBias::Bullish,
        reversal: None,
    });
    snapshot.money_flow = Some(MoneyFlowSnapshot {
        mfi: 62.0,
        value: 0.3,
    });
    snapshot
}

#[tokio::test]
async fn test_unanimous_gates_fire_long() {
    let signal = strategy()
        .analyze(&consensus_long_snapshot(), SIZING, FEE, &context())
        .await
        .expect("signal expected");

    assert_eq!(signal.action, TradeAction::Long);
    assert_eq!(signal.signal_level, Some(SignalLevel::Standard));
    assert!((signal.entry - 100.0).abs() < 1e-9);
    assert!((signal.stop - 98.0).abs() < 1e-9);
    assert!((signal.target - 110.0).abs() < 1e-9);
    let targets = signal.targets.unwrap();
    assert_eq!(targets, vec![110.0, 120.0, 130.0]);
}

#[tokio::test]
async fn test_momentum_disagreement_blocks() {
    let mut snapshot = consensus_long_snapshot();
    if let Some(momentum) = snapshot.momentum.as_mut() {
        momentum.value = -5.0;
        momentum.bias = MomentumBias::Bearish;
    }
    assert!(strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .is_none());
}

#[tokio::test]
async fn test_near_zero_momentum_acts_as_wildcard() {
    let mut snapshot = consensus_long_snapshot();
    if let Some(momentum) = snapshot.momentum.as_mut() {
        momentum.value = 0.4;
        momentum.bias = MomentumBias::Flat;
    }
    let signal = strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .expect("signal expected");
    assert_eq!(signal.action, TradeAction::Long);
}

#[tokio::test]
async fn test_weak_money_flow_fails_strength_check() {
    let mut snapshot = consensus_long_snapshot();
    snapshot.money_flow = Some(MoneyFlowSnapshot {
        mfi: 62.0,
        value: 0.02,
    });
    assert!(strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .is_none());
}

#[tokio::test]
async fn test_mixed_money_flow_reading_blocks() {
    // mfi says accumulation, signed flow says distribution
    let mut snapshot = consensus_long_snapshot();
    snapshot.money_flow = Some(MoneyFlowSnapshot {
        mfi: 62.0,
        value: -0.3,
    });
    assert!(strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .is_none());
}

#[tokio::test]
async fn test_strong_matching_pulse_is_perfect_entry() {
    let mut snapshot = consensus_long_snapshot();
    if let Some(momentum) = snapshot.momentum.as_mut() {
        momentum.reversal = Some(ReversalPulse {
            color: PulseColor::Green,
            strength: 70.0,
        });
    }
    let signal = strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .unwrap();
    assert_eq!(signal.signal_level, Some(SignalLevel::Perfect));
}

#[tokio::test]
async fn test_weak_pulse_stays_standard() {
    let mut snapshot = consensus_long_snapshot();
    if let Some(momentum) = snapshot.momentum.as_mut() {
        momentum.reversal = Some(ReversalPulse {
            color: PulseColor::Green,
            strength: 10.0,
        });
    }
    let signal = strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .unwrap();
    assert_eq!(signal.signal_level, Some(SignalLevel::Standard));
}

#[tokio::test]
async fn test_short_consensus_brackets() {
    let mut snapshot = consensus_long_snapshot();
    snapshot.mark_price = 96.0; // below vwap
    snapshot.momentum = Some(MomentumSnapshot {
        value: -5.0,
        signal: -3.0,
        rsi: Some(50.0),
        bias: MomentumBias::Bearish,
        reversal: None,
    });
    snapshot.money_flow = Some(MoneyFlowSnapshot {
        mfi: 35.0,
        value: -0.3,
    });

    let signal = strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .expect("signal expected");
    assert_eq!(signal.action, TradeAction::Short);
    assert!((signal.stop - 96.0 * 1.02).abs() < 0.01);
    assert!((signal.target - 96.0 * 0.90).abs() < 0.01);
}

#[tokio::test]
async fn test_missing_vwap_abstains() {
    let mut snapshot = consensus_long_snapshot();
    snapshot.vwap = None;
    assert!(strategy()
        .analyze(&snapshot, SIZING, FEE, &context())
        .await
        .is_none());
}
