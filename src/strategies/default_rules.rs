//! Default strategy: multi-indicator rule cascade with confirmation filters.
//!
//! Four entry rules run in strict priority; the first one to pick a side
//! wins and later rules are skipped. Three confirmation filters then run in
//! order, each able only to veto the chosen side, never to flip it.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::signal::{EvalContext, TradeAction, TradeSignal, ValidationResult};
use crate::models::snapshot::{MarketSnapshot, MomentumBias, PulseColor};
use crate::services::OrderRequest;
use crate::strategies::{risk, Strategy};

const MOMENTUM_RSI_OVERSOLD: f64 = 30.0;
const MOMENTUM_RSI_OVERBOUGHT: f64 = 70.0;
const STOCH_OVERSOLD: f64 = 20.0;
const STOCH_OVERBOUGHT: f64 = 80.0;
const MACD_BARE_HISTOGRAM_TREND: f64 = 0.3;
const MACD_BARE_HISTOGRAM_STRONG: f64 = 0.5;
const ADX_FALLBACK_REFERENCE: f64 = 25.0;

/// Outcome of one cascade rule.
#[derive(Debug, Clone)]
struct RuleMatch {
    side: TradeAction,
    label: &'static str,
    detail: String,
}

pub struct DefaultStrategy {
    min_take_profit_pct: f64,
}

impl DefaultStrategy {
    pub fn new(config: &Config) -> Self {
        Self {
            min_take_profit_pct: config.min_take_profit_pct,
        }
    }

    fn run_cascade(snapshot: &MarketSnapshot) -> Option<RuleMatch> {
        momentum_rule(snapshot)
            .or_else(|| stochastic_rule(snapshot))
            .or_else(|| macd_rule(snapshot))
            .or_else(|| adx_rule(snapshot))
    }

    fn run_filters(
        snapshot: &MarketSnapshot,
        side: TradeAction,
        ctx: &EvalContext,
    ) -> Option<ValidationResult> {
        let mut filters = vec![
            money_flow_filter(snapshot, side),
            vwap_filter(snapshot, side),
        ];
        if snapshot.market.symbol != ctx.reference_symbol {
            filters.push(trend_filter(ctx, side));
        }
        filters.into_iter().find(|f| !f.is_valid)
    }

    /// Stop/target percents referenced off the VWAP bands: the relative
    /// distance from price to the nearest band on the protective side and
    /// on the profit side. No band on a needed side means no trade.
    fn band_percents(snapshot: &MarketSnapshot, side: TradeAction) -> Option<(f64, f64)> {
        let vwap = snapshot.vwap.as_ref()?;
        let price = snapshot.mark_price;
        if price <= 0.0 {
            return None;
        }

        let (protective, profit) = match side {
            TradeAction::Long => (
                risk::nearest_band_below(&vwap.lower, price)?,
                risk::nearest_band_above(&vwap.upper, price)?,
            ),
            TradeAction::Short => (
                risk::nearest_band_above(&vwap.upper, price)?,
                risk::nearest_band_below(&vwap.lower, price)?,
            ),
        };

        let stop_pct = (price - protective).abs() / price;
        let target_pct = (profit - price).abs() / price;
        Some((stop_pct, target_pct))
    }
}

#[async_trait]
impl Strategy for DefaultStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    async fn analyze(
        &self,
        snapshot: &MarketSnapshot,
        sizing: f64,
        fee_rate: f64,
        ctx: &EvalContext,
    ) -> Option<TradeSignal> {
        let data = risk::validate_data(snapshot);
        if !data.is_valid {
            debug!(market = %snapshot.market.symbol, reason = %data.reason, "abstain");
            return None;
        }

        let matched = Self::run_cascade(snapshot)?;
        debug!(
            market = %snapshot.market.symbol,
            rule = matched.label,
            side = ?matched.side,
            "cascade matched"
        );

        if let Some(veto) = Self::run_filters(snapshot, matched.side, ctx) {
            debug!(
                market = %snapshot.market.symbol,
                rule = matched.label,
                reason = %veto.reason,
                "confirmation filter veto"
            );
            return None;
        }

        let price = snapshot.mark_price;
        let (stop_pct, target_pct) = Self::band_percents(snapshot, matched.side)?;
        let (stop, target) = risk::calculate_stop_and_target(
            ctx.account.as_ref(),
            price,
            matched.side.is_long(),
            Some(stop_pct),
            Some(target_pct),
        )
        .await?;

        let entry = snapshot.market.round_price(price);
        let stop = snapshot.market.round_price(stop);
        let target = snapshot.market.round_price(target);

        let take_profit = risk::validate_take_profit(entry, stop, target, self.min_take_profit_pct);
        if !take_profit.is_valid {
            debug!(
                market = %snapshot.market.symbol,
                reason = %take_profit.reason,
                "take profit rejected"
            );
            return None;
        }

        let (pnl, risk_amount) =
            risk::calculate_pnl_and_risk(matched.side, entry, stop, target, sizing, fee_rate)?;

        let mut signal = TradeSignal {
            market: snapshot.market.symbol.clone(),
            action: matched.side,
            entry,
            stop,
            target,
            targets: None,
            pnl,
            risk: risk_amount,
            signal_level: None,
            confluences: None,
            reason: Some(format!("{}: {}", matched.label, matched.detail)),
            order_id: None,
        };

        if let Some(executor) = &ctx.executor {
            let request = OrderRequest {
                market: signal.market.clone(),
                action: signal.action,
                entry: signal.entry,
                stop: signal.stop,
                target: signal.target,
                targets: None,
                size: sizing,
            };
            match executor.submit(&request).await {
                Ok(ack) => signal.order_id = Some(ack.order_id),
                Err(error) => {
                    warn!(market = %signal.market, %error, "order submission failed");
                }
            }
        }

        Some(signal)
    }
}

/// Rule 1: reversal pulse color, or oscillator-RSI exhaustion aligned with
/// the oscillator bias.
fn momentum_rule(snapshot: &MarketSnapshot) -> Option<RuleMatch> {
    let momentum = snapshot.momentum.as_ref()?;

    if let Some(pulse) = momentum.reversal {
        let side = match pulse.color {
            PulseColor::Green => TradeAction::Long,
            PulseColor::Red => TradeAction::Short,
        };
        return Some(RuleMatch {
            side,
            label: "momentum",
            detail: format!("reversal pulse {:?} strength {:.2}", pulse.color, pulse.strength),
        });
    }

    let osc_rsi = momentum.rsi?;
    if osc_rsi <= MOMENTUM_RSI_OVERSOLD && momentum.bias == MomentumBias::Bullish {
        return Some(RuleMatch {
            side: TradeAction::Long,
            label: "momentum",
            detail: format!("oscillator rsi {:.1} oversold with bullish bias", osc_rsi),
        });
    }
    if osc_rsi >= MOMENTUM_RSI_OVERBOUGHT && momentum.bias == MomentumBias::Bearish {
        return Some(RuleMatch {
            side: TradeAction::Short,
            label: "momentum",
            detail: format!("oscillator rsi {:.1} overbought with bearish bias", osc_rsi),
        });
    }
    None
}

/// Rule 2: oversold/overbought stochastic with a %D/%K cross against the
/// previous sample.
fn stochastic_rule(snapshot: &MarketSnapshot) -> Option<RuleMatch> {
    let stoch = snapshot.stochastic.as_ref()?;
    let (prev_k, prev_d) = (stoch.prev_k?, stoch.prev_d?);

    if stoch.k <= STOCH_OVERSOLD
        && stoch.d <= STOCH_OVERSOLD
        && prev_d <= prev_k
        && stoch.d > stoch.k
    {
        return Some(RuleMatch {
            side: TradeAction::Long,
            label: "stochastic",
            detail: format!("oversold, d crossed above k ({:.1}/{:.1})", stoch.k, stoch.d),
        });
    }
    if stoch.k >= STOCH_OVERBOUGHT
        && stoch.d >= STOCH_OVERBOUGHT
        && prev_k <= prev_d
        && stoch.k > stoch.d
    {
        return Some(RuleMatch {
            side: TradeAction::Short,
            label: "stochastic",
            detail: format!("overbought, k crossed above d ({:.1}/{:.1})", stoch.k, stoch.d),
        });
    }
    None
}

/// Rule 3: histogram momentum, with bare-histogram fallbacks when no signal
/// line exists yet.
fn macd_rule(snapshot: &MarketSnapshot) -> Option<RuleMatch> {
    let macd = snapshot.macd.as_ref()?;
    let hist = macd.histogram;
    let growing = macd.prev_histogram.map(|prev| hist > prev);
    let shrinking = macd.prev_histogram.map(|prev| hist < prev);

    let long = match macd.signal {
        Some(signal) => hist > 0.0 && macd.macd > signal && growing == Some(true),
        None => {
            (hist > MACD_BARE_HISTOGRAM_TREND && growing == Some(true))
                || hist > MACD_BARE_HISTOGRAM_STRONG
        }
    };
    if long {
        return Some(RuleMatch {
            side: TradeAction::Long,
            label: "macd",
            detail: format!("histogram {:.4} rising", hist),
        });
    }

    let short = match macd.signal {
        Some(signal) => hist < 0.0 && macd.macd < signal && shrinking == Some(true),
        None => {
            (hist < -MACD_BARE_HISTOGRAM_TREND && shrinking == Some(true))
                || hist < -MACD_BARE_HISTOGRAM_STRONG
        }
    };
    if short {
        return Some(RuleMatch {
            side: TradeAction::Short,
            label: "macd",
            detail: format!("histogram {:.4} falling", hist),
        });
    }
    None
}

/// Rule 4: trend strength above its own average; direction from the DI
/// spread.
fn adx_rule(snapshot: &MarketSnapshot) -> Option<RuleMatch> {
    let adx = snapshot.adx.as_ref()?;
    let reference = adx.adx_ema.unwrap_or(ADX_FALLBACK_REFERENCE);
    if adx.value <= reference {
        return None;
    }

    let spread = adx.plus_di - adx.minus_di;
    if spread == 0.0 {
        return None;
    }
    let side = if spread > 0.0 {
        TradeAction::Long
    } else {
        TradeAction::Short
    };
    Some(RuleMatch {
        side,
        label: "adx",
        detail: format!("adx {:.1} above reference {:.1}, di spread {:.1}", adx.value, reference, spread),
    })
}

fn money_flow_filter(snapshot: &MarketSnapshot, side: TradeAction) -> ValidationResult {
    let Some(flow) = &snapshot.money_flow else {
        return ValidationResult::invalid("money flow unavailable");
    };
    let confirmed = match side {
        TradeAction::Long => flow.mfi > 50.0 && flow.value > 0.0,
        TradeAction::Short => flow.mfi < 50.0 && flow.value < 0.0,
    };
    let details = json!({"mfi": flow.mfi, "value": flow.value});
    if confirmed {
        ValidationResult::valid("money flow confirms").with_details(details)
    } else {
        ValidationResult::invalid("money flow contradicts side").with_details(details)
    }
}

fn vwap_filter(snapshot: &MarketSnapshot, side: TradeAction) -> ValidationResult {
    let Some(vwap) = &snapshot.vwap else {
        return ValidationResult::invalid("vwap unavailable");
    };
    let confirmed = match side {
        TradeAction::Long => snapshot.mark_price > vwap.value,
        TradeAction::Short => snapshot.mark_price < vwap.value,
    };
    let details = json!({"price": snapshot.mark_price, "vwap": vwap.value});
    if confirmed {
        ValidationResult::valid("price on the right side of vwap").with_details(details)
    } else {
        ValidationResult::invalid("price on the wrong side of vwap").with_details(details)
    }
}

fn trend_filter(ctx: &EvalContext, side: TradeAction) -> ValidationResult {
    if ctx.broader_trend.supports(side) {
        ValidationResult::valid("broader market trend aligned")
    } else {
        ValidationResult::invalid("broader market trend neutral or opposed")
    }
}
