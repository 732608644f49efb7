//! CypherPunk strategy: three-gate unanimous consensus with fixed brackets.
//!
//! VWAP bias, wave momentum and money flow are validated independently and
//! in that order; a trade fires only when all three pass and no gate
//! disagrees on direction. The momentum gate is the most permissive: a
//! directional reading, a near-zero reading, or a detected reversal all
//! pass, and a near-zero reading contributes no direction of its own.
//! Targets and stops are fixed percentages of entry, independent of
//! volatility.

use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use crate::models::signal::{EvalContext, SignalLevel, TradeAction, TradeSignal};
use crate::models::snapshot::{MarketSnapshot, PulseColor};
use crate::strategies::{risk, Strategy};

const TARGET_STEPS: [f64; 3] = [0.10, 0.20, 0.30];
const STOP_STEPS: [f64; 3] = [0.02, 0.04, 0.06];
const MOMENTUM_NEUTRAL_BAND: f64 = 1.0;
const MONEY_FLOW_MIN_STRENGTH: f64 = 0.05;
const PERFECT_PULSE_STRENGTH: f64 = 60.0;

/// One gate's verdict: whether it passes, and the direction it reads if it
/// reads one.
#[derive(Debug, Clone, Copy)]
struct GateVerdict {
    passed: bool,
    side: Option<TradeAction>,
}

pub struct CypherPunkStrategy {
    timeframe: String,
}

impl CypherPunkStrategy {
    pub fn new(config: &Config) -> Self {
        Self {
            timeframe: config.timeframe.clone(),
        }
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    fn vwap_gate(snapshot: &MarketSnapshot) -> GateVerdict {
        let Some(vwap) = &snapshot.vwap else {
            return GateVerdict {
                passed: false,
                side: None,
            };
        };
        let side = if snapshot.mark_price > vwap.value {
            Some(TradeAction::Long)
        } else if snapshot.mark_price < vwap.value {
            Some(TradeAction::Short)
        } else {
            None
        };
        GateVerdict {
            passed: side.is_some(),
            side,
        }
    }

    fn momentum_gate(snapshot: &MarketSnapshot) -> GateVerdict {
        let Some(momentum) = &snapshot.momentum else {
            return GateVerdict {
                passed: false,
                side: None,
            };
        };

        if let Some(pulse) = momentum.reversal {
            let side = match pulse.color {
                PulseColor::Green => TradeAction::Long,
                PulseColor::Red => TradeAction::Short,
            };
            return GateVerdict {
                passed: true,
                side: Some(side),
            };
        }

        if momentum.value.abs() < MOMENTUM_NEUTRAL_BAND {
            // near-zero reading passes without a direction of its own
            return GateVerdict {
                passed: true,
                side: None,
            };
        }

        let side = if momentum.value > 0.0 {
            TradeAction::Long
        } else {
            TradeAction::Short
        };
        GateVerdict {
            passed: true,
            side: Some(side),
        }
    }

    fn money_flow_gate(snapshot: &MarketSnapshot) -> GateVerdict {
        let Some(flow) = &snapshot.money_flow else {
            return GateVerdict {
                passed: false,
                side: None,
            };
        };
        if flow.value.abs() < MONEY_FLOW_MIN_STRENGTH {
            return GateVerdict {
                passed: false,
                side: None,
            };
        }

        let side = if flow.mfi > 50.0 && flow.value > 0.0 {
            Some(TradeAction::Long)
        } else if flow.mfi < 50.0 && flow.value < 0.0 {
            Some(TradeAction::Short)
        } else {
            None
        };
        GateVerdict {
            passed: side.is_some(),
            side,
        }
    }

    /// All gates passed and no gate disagrees; the direction is whatever
    /// the directional gates agree on.
    fn consensus(verdicts: &[GateVerdict]) -> Option<TradeAction> {
        if verdicts.iter().any(|v| !v.passed) {
            return None;
        }
        let mut agreed: Option<TradeAction> = None;
        for verdict in verdicts {
            match (agreed, verdict.side) {
                (None, side) => agreed = side,
                (Some(current), Some(side)) if side != current => return None,
                _ => {}
            }
        }
        agreed
    }
}

#[async_trait]
impl Strategy for CypherPunkStrategy {
    fn name(&self) -> &'static str {
        "cypherpunk"
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

        let verdicts = [
            Self::vwap_gate(snapshot),
            Self::momentum_gate(snapshot),
            Self::money_flow_gate(snapshot),
        ];
        let side = Self::consensus(&verdicts)?;

        let level = snapshot
            .momentum
            .as_ref()
            .and_then(|m| m.reversal)
            .filter(|pulse| {
                pulse.strength > PERFECT_PULSE_STRENGTH
                    && matches!(
                        (pulse.color, side),
                        (PulseColor::Green, TradeAction::Long)
                            | (PulseColor::Red, TradeAction::Short)
                    )
            })
            .map(|_| SignalLevel::Perfect)
            .unwrap_or(SignalLevel::Standard);

        let price = snapshot.mark_price;
        if price <= 0.0 {
            return None;
        }
        let entry = snapshot.market.round_price(price);

        let targets: Vec<f64> = TARGET_STEPS
            .iter()
            .map(|step| match side {
                TradeAction::Long => entry * (1.0 + step),
                TradeAction::Short => entry * (1.0 - step),
            })
            .map(|level| snapshot.market.round_price(level))
            .collect();
        let stops: Vec<f64> = STOP_STEPS
            .iter()
            .map(|step| match side {
                TradeAction::Long => entry * (1.0 - step),
                TradeAction::Short => entry * (1.0 + step),
            })
            .map(|level| snapshot.market.round_price(level))
            .collect();

        let target = targets[0];
        let stop = stops[0];
        let (pnl, risk_amount) =
            risk::calculate_pnl_and_risk(side, entry, stop, target, sizing, fee_rate)?;

        debug!(
            market = %snapshot.market.symbol,
            side = ?side,
            level = ?level,
            timeframe = %self.timeframe,
            "cypherpunk consensus"
        );

        Some(TradeSignal {
            market: snapshot.market.symbol.clone(),
            action: side,
            entry,
            stop,
            target,
            targets: Some(targets),
            pnl,
            risk: risk_amount,
            signal_level: Some(level),
            confluences: None,
            reason: Some("vwap, momentum and money flow unanimous".to_string()),
            order_id: None,
        })
    }
}
