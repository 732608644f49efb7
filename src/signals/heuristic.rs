//! Standalone VWAP-bracket heuristic.
//!
//! An independent evaluator usable without the strategy objects: a recent
//! EMA cross, an RSI reversal against its own moving average, or plain
//! EMA+RSI alignment triggers a trade bracketed by the nearest VWAP bands,
//! with the target damped to 95% of the distance to its band.

use tracing::debug;

use crate::models::signal::{TradeAction, TradeSignal};
use crate::models::snapshot::{CrossKind, MarketSnapshot};
use crate::strategies::risk;

const MAX_CROSS_AGE: usize = 2;
const TARGET_DAMPING: f64 = 0.95;
const RSI_MA_PERIOD: usize = 14;

pub fn evaluate(snapshot: &MarketSnapshot, sizing: f64, fee_rate: f64) -> Option<TradeSignal> {
    let vwap = snapshot.vwap.as_ref()?;
    if vwap.upper.is_empty() || vwap.lower.is_empty() {
        return None;
    }

    let side = trigger_side(snapshot)?;
    let price = snapshot.mark_price;
    if price <= 0.0 {
        return None;
    }

    let (stop, target_basis) = match side {
        TradeAction::Long => (
            risk::nearest_band_below(&vwap.lower, price)?,
            risk::nearest_band_above(&vwap.upper, price)?,
        ),
        TradeAction::Short => (
            risk::nearest_band_above(&vwap.upper, price)?,
            risk::nearest_band_below(&vwap.lower, price)?,
        ),
    };
    let target = price + (target_basis - price) * TARGET_DAMPING;

    let entry = snapshot.market.round_price(price);
    let stop = snapshot.market.round_price(stop);
    let target = snapshot.market.round_price(target);
    let (pnl, risk_amount) =
        risk::calculate_pnl_and_risk(side, entry, stop, target, sizing, fee_rate)?;

    debug!(market = %snapshot.market.symbol, side = ?side, entry, stop, target, "heuristic bracket");

    Some(TradeSignal {
        market: snapshot.market.symbol.clone(),
        action: side,
        entry,
        stop,
        target,
        targets: None,
        pnl,
        risk: risk_amount,
        signal_level: None,
        confluences: None,
        reason: Some("vwap bracket heuristic".to_string()),
        order_id: None,
    })
}

/// Trigger order: recent EMA cross, then RSI reversal against its moving
/// average, then EMA+RSI directional alignment.
fn trigger_side(snapshot: &MarketSnapshot) -> Option<TradeAction> {
    if let Some(cross) = &snapshot.ema_cross {
        if cross.candles_ago <= MAX_CROSS_AGE {
            return Some(match cross.kind {
                CrossKind::Golden => TradeAction::Long,
                CrossKind::Death => TradeAction::Short,
            });
        }
    }

    if let Some(side) = rsi_reversal(snapshot) {
        return Some(side);
    }

    let (fast, slow) = (snapshot.ema_fast?, snapshot.ema_slow?);
    let rsi = snapshot.rsi?;
    if fast > slow && rsi > 50.0 {
        return Some(TradeAction::Long);
    }
    if fast < slow && rsi < 50.0 {
        return Some(TradeAction::Short);
    }
    None
}

/// RSI crossing back over its own moving average against the previous
/// sample.
fn rsi_reversal(snapshot: &MarketSnapshot) -> Option<TradeAction> {
    let history = &snapshot.rsi_history;
    if history.len() < RSI_MA_PERIOD + 1 {
        return None;
    }

    let current = history[history.len() - 1];
    let previous = history[history.len() - 2];
    let current_ma = mean(&history[history.len() - RSI_MA_PERIOD..]);
    let previous_ma = mean(&history[history.len() - 1 - RSI_MA_PERIOD..history.len() - 1]);

    if previous <= previous_ma && current > current_ma {
        Some(TradeAction::Long)
    } else if previous >= previous_ma && current < current_ma {
        Some(TradeAction::Short)
    } else {
        None
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
