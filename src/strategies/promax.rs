//! ProMax strategy: ADX confluence tiering with a volatility-scaled ladder.
//!
//! A DI+/DI− reversal while ADX still sits under its threshold ("the move
//! starts before the trend reading confirms it") opens a direction; each
//! enabled validator whose own threshold cross fires adds one confluence.
//! The confluence count maps onto a tier, and the stop/target ladder scales
//! with ATR and the evaluation timeframe.

use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use crate::models::signal::{ConfluenceTier, EvalContext, SignalLevel, TradeAction, TradeSignal};
use crate::models::snapshot::MarketSnapshot;
use crate::strategies::{risk, Strategy};

pub struct ProMaxStrategy {
    adx_threshold: f64,
    rsi_validator_enabled: bool,
    rsi_bull_threshold: f64,
    rsi_bear_threshold: f64,
    stochastic_validator_enabled: bool,
    stochastic_bull_threshold: f64,
    stochastic_bear_threshold: f64,
    macd_validator_enabled: bool,
    ignore_bronze_signals: bool,
    atr_zone_multiplier: f64,
    stop_loss_atr_multiplier: f64,
    max_targets: usize,
    timeframe_multiplier: f64,
}

impl ProMaxStrategy {
    pub fn new(config: &Config) -> Self {
        Self {
            adx_threshold: config.adx_threshold,
            rsi_validator_enabled: config.rsi_validator_enabled,
            rsi_bull_threshold: config.rsi_bull_threshold,
            rsi_bear_threshold: config.rsi_bear_threshold,
            stochastic_validator_enabled: config.stochastic_validator_enabled,
            stochastic_bull_threshold: config.stochastic_bull_threshold,
            stochastic_bear_threshold: config.stochastic_bear_threshold,
            macd_validator_enabled: config.macd_validator_enabled,
            ignore_bronze_signals: config.ignore_bronze_signals,
            atr_zone_multiplier: config.atr_zone_multiplier,
            stop_loss_atr_multiplier: config.stop_loss_atr_multiplier,
            max_targets: config.max_targets,
            timeframe_multiplier: timeframe_multiplier(&config.timeframe),
        }
    }

    /// DI reversal while ADX still reads below the threshold.
    fn reversal_direction(&self, snapshot: &MarketSnapshot) -> Option<TradeAction> {
        let adx = snapshot.adx.as_ref()?;
        if adx.value >= self.adx_threshold {
            return None;
        }
        let (prev_plus, prev_minus) = (adx.prev_plus_di?, adx.prev_minus_di?);

        if prev_plus <= prev_minus && adx.plus_di > adx.minus_di {
            Some(TradeAction::Long)
        } else if prev_plus >= prev_minus && adx.plus_di < adx.minus_di {
            Some(TradeAction::Short)
        } else {
            None
        }
    }

    /// Confluence labels for the direction: the ADX reversal itself plus
    /// every enabled validator whose threshold cross fires.
    fn confluences(&self, snapshot: &MarketSnapshot, side: TradeAction) -> Vec<String> {
        let mut confirmed = vec!["adx reversal".to_string()];

        if self.rsi_validator_enabled {
            let history = &snapshot.rsi_history;
            if history.len() >= 2 {
                let (prev, now) = (history[history.len() - 2], history[history.len() - 1]);
                let fired = match side {
                    TradeAction::Long => {
                        prev <= self.rsi_bull_threshold && now > self.rsi_bull_threshold
                    }
                    TradeAction::Short => {
                        prev >= self.rsi_bear_threshold && now < self.rsi_bear_threshold
                    }
                };
                if fired {
                    confirmed.push("rsi cross".to_string());
                }
            }
        }

        if self.stochastic_validator_enabled {
            if let Some(stoch) = &snapshot.stochastic {
                if let Some(prev_k) = stoch.prev_k {
                    let fired = match side {
                        TradeAction::Long => {
                            prev_k <= self.stochastic_bull_threshold
                                && stoch.k > self.stochastic_bull_threshold
                        }
                        TradeAction::Short => {
                            prev_k >= self.stochastic_bear_threshold
                                && stoch.k < self.stochastic_bear_threshold
                        }
                    };
                    if fired {
                        confirmed.push("stochastic cross".to_string());
                    }
                }
            }
        }

        if self.macd_validator_enabled {
            if let Some(macd) = &snapshot.macd {
                if let Some(prev) = macd.prev_histogram {
                    let fired = match side {
                        TradeAction::Long => prev <= 0.0 && macd.histogram > 0.0,
                        TradeAction::Short => prev >= 0.0 && macd.histogram < 0.0,
                    };
                    if fired {
                        confirmed.push("macd flip".to_string());
                    }
                }
            }
        }

        confirmed
    }

    /// Ladder of `price ± atr·zone·timeframe·k`, non-positive levels
    /// dropped.
    fn build_ladder(&self, price: f64, atr: f64, side: TradeAction) -> Vec<f64> {
        let step = atr * self.atr_zone_multiplier * self.timeframe_multiplier;
        (1..=self.max_targets)
            .map(|k| match side {
                TradeAction::Long => price + step * k as f64,
                TradeAction::Short => price - step * k as f64,
            })
            .filter(|level| *level > 0.0)
            .collect()
    }
}

#[async_trait]
impl Strategy for ProMaxStrategy {
    fn name(&self) -> &'static str {
        "promax"
    }

    async fn analyze(
        &self,
        snapshot: &MarketSnapshot,
        sizing: f64,
        fee_rate: f64,
        _ctx: &EvalContext,
    ) -> Option<TradeSignal> {
        let data = risk::validate_data(snapshot);
        if !data.is_valid {
            debug!(market = %snapshot.market.symbol, reason = %data.reason, "abstain");
            return None;
        }

        let side = self.reversal_direction(snapshot)?;
        let confluences = self.confluences(snapshot, side);
        let tier = ConfluenceTier::from_count(confluences.len() as u8);

        if self.ignore_bronze_signals && tier == ConfluenceTier::Bronze {
            debug!(market = %snapshot.market.symbol, "bronze signal suppressed");
            return None;
        }

        let atr = snapshot.atr.filter(|atr| *atr > 0.0)?;
        let price = snapshot.mark_price;

        let stop = match side {
            TradeAction::Long => price - atr * self.stop_loss_atr_multiplier,
            TradeAction::Short => price + atr * self.stop_loss_atr_multiplier,
        };
        if stop <= 0.0 {
            debug!(market = %snapshot.market.symbol, stop, "non-positive stop");
            return None;
        }

        let ladder: Vec<f64> = self
            .build_ladder(price, atr, side)
            .into_iter()
            .map(|level| snapshot.market.round_price(level))
            .collect();
        if ladder.is_empty() {
            debug!(market = %snapshot.market.symbol, "no valid targets in ladder");
            return None;
        }

        let entry = snapshot.market.round_price(price);
        let stop = snapshot.market.round_price(stop);
        let target = ladder[0];
        let (pnl, risk_amount) =
            risk::calculate_pnl_and_risk(side, entry, stop, target, sizing, fee_rate)?;

        debug!(
            market = %snapshot.market.symbol,
            side = ?side,
            tier = ?tier,
            targets = ladder.len(),
            "promax signal"
        );

        Some(TradeSignal {
            market: snapshot.market.symbol.clone(),
            action: side,
            entry,
            stop,
            target,
            targets: Some(ladder),
            pnl,
            risk: risk_amount,
            signal_level: Some(SignalLevel::from(tier)),
            confluences: Some(confluences),
            reason: Some("di reversal under adx threshold".to_string()),
            order_id: None,
        })
    }
}

/// Ladder step scaling per evaluation timeframe: 0.5 on the fastest chart
/// up to 4.0 on the slowest. Unknown strings use 1.0.
fn timeframe_multiplier(timeframe: &str) -> f64 {
    match timeframe {
        "1m" => 0.5,
        "5m" => 1.0,
        "15m" => 1.5,
        "30m" => 2.0,
        "1h" => 2.5,
        "4h" => 3.0,
        "12h" => 3.5,
        "1d" => 4.0,
        _ => 1.0,
    }
}
