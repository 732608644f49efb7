//! Shared risk and validation math consumed by every strategy variant.

use serde_json::json;
use tracing::{debug, warn};

use crate::models::signal::{TradeAction, ValidationResult};
use crate::models::snapshot::MarketSnapshot;
use crate::services::AccountProvider;

/// A strategy must abstain unless the snapshot carries a VWAP value and
/// both band arrays.
pub fn validate_data(snapshot: &MarketSnapshot) -> ValidationResult {
    match &snapshot.vwap {
        Some(vwap) if !vwap.upper.is_empty() && !vwap.lower.is_empty() => {
            ValidationResult::valid("vwap bands present")
        }
        Some(_) => ValidationResult::invalid("vwap band arrays empty"),
        None => ValidationResult::invalid("vwap missing"),
    }
}

/// Projected profit at target and loss at stop for a position of
/// `investment` quote units, with fees charged on the entry notional and on
/// the notional of the leg actually reached.
pub fn calculate_pnl_and_risk(
    action: TradeAction,
    entry: f64,
    stop: f64,
    target: f64,
    investment: f64,
    fee_rate: f64,
) -> Option<(f64, f64)> {
    if entry <= 0.0 {
        return None;
    }
    let units = investment / entry;

    let (gross_target, gross_loss) = match action {
        TradeAction::Long => ((target - entry) * units, (entry - stop) * units),
        TradeAction::Short => ((entry - target) * units, (stop - entry) * units),
    };

    let entry_fee = units * entry * fee_rate;
    let exit_fee_on_target = units * target * fee_rate;
    let exit_fee_on_loss = units * stop * fee_rate;

    let pnl = gross_target - (entry_fee + exit_fee_on_target);
    let risk = gross_loss + (entry_fee + exit_fee_on_loss);
    Some((pnl, risk))
}

/// Reject targets whose move from entry is below the configured minimum.
/// The risk/reward ratio rides along in the details for logging.
pub fn validate_take_profit(
    entry: f64,
    stop: f64,
    target: f64,
    min_take_profit_pct: f64,
) -> ValidationResult {
    if entry <= 0.0 {
        return ValidationResult::invalid("entry price must be positive");
    }

    let target_move = (target - entry).abs();
    let stop_move = (entry - stop).abs();
    let target_move_pct = target_move / entry;
    let risk_reward = if stop_move > 0.0 {
        target_move / stop_move
    } else {
        0.0
    };

    let details = json!({
        "risk_reward": risk_reward,
        "target_move_pct": target_move_pct * 100.0,
        "min_take_profit_pct": min_take_profit_pct * 100.0,
    });

    if target_move_pct < min_take_profit_pct {
        ValidationResult::invalid("target move below configured minimum").with_details(details)
    } else {
        ValidationResult::valid("take profit acceptable").with_details(details)
    }
}

/// Closest band strictly below the price, if any.
pub fn nearest_band_below(bands: &[f64], price: f64) -> Option<f64> {
    bands
        .iter()
        .copied()
        .filter(|band| *band < price)
        .fold(None, |best: Option<f64>, band| {
            Some(best.map_or(band, |b| b.max(band)))
        })
}

/// Closest band strictly above the price, if any.
pub fn nearest_band_above(bands: &[f64], price: f64) -> Option<f64> {
    bands
        .iter()
        .copied()
        .filter(|band| *band > price)
        .fold(None, |best: Option<f64>, band| {
            Some(best.map_or(band, |b| b.min(band)))
        })
}

/// Leverage-aware stop/target derivation.
///
/// The raw stop-loss percent is divided by the account leverage: a
/// leveraged position reaches a given loss on a smaller raw price move, so
/// the effective stop sits proportionally closer to entry. Leverage lookup
/// failures fall back to 1×. Returns `None` when either percent parameter
/// is absent or non-positive, or when the derived prices fail to straddle
/// the entry on the correct sides.
pub async fn calculate_stop_and_target(
    account: &dyn AccountProvider,
    price: f64,
    is_long: bool,
    stop_loss_pct: Option<f64>,
    take_profit_pct: Option<f64>,
) -> Option<(f64, f64)> {
    let Some(stop_loss_pct) = stop_loss_pct.filter(|p| *p > 0.0) else {
        debug!("stop-loss percent missing or non-positive, rejecting");
        return None;
    };
    let Some(take_profit_pct) = take_profit_pct.filter(|p| *p > 0.0) else {
        debug!("take-profit percent missing or non-positive, rejecting");
        return None;
    };

    let leverage = match account.get_leverage().await {
        Ok(leverage) if leverage >= 1.0 => leverage,
        Ok(leverage) => {
            debug!(leverage, "sub-1x leverage reported, using 1x");
            1.0
        }
        Err(error) => {
            warn!(%error, "leverage lookup failed, using 1x");
            1.0
        }
    };
    let effective_stop_pct = stop_loss_pct / leverage;

    let (stop, target) = if is_long {
        (
            price * (1.0 - effective_stop_pct),
            price * (1.0 + take_profit_pct),
        )
    } else {
        (
            price * (1.0 + effective_stop_pct),
            price * (1.0 - take_profit_pct),
        )
    };

    let straddles = if is_long {
        stop < price && target > price
    } else {
        stop > price && target < price
    };
    if !straddles {
        debug!(price, stop, target, is_long, "stop/target fail straddle check");
        return None;
    }

    Some((stop, target))
}
