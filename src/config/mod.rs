//! Consolidated engine configuration.
//!
//! Every recognized option lives here and is supplied at construction;
//! strategies never read the environment themselves.

use serde::{Deserialize, Serialize};

/// Deployment environment, used to pick the log formatter.
pub fn get_environment() -> String {
    dotenvy::dotenv().ok();
    std::env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Full configuration surface of the decision core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Indicator periods
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub stochastic_period: usize,
    pub stochastic_smoothing: usize,
    pub atr_period: usize,
    pub adx_period: usize,
    /// Lookback for the EMA smoothed over the ADX series itself.
    pub adx_average_length: usize,

    // ProMax confluence
    pub adx_threshold: f64,
    pub rsi_validator_enabled: bool,
    pub rsi_bull_threshold: f64,
    pub rsi_bear_threshold: f64,
    pub stochastic_validator_enabled: bool,
    pub stochastic_bull_threshold: f64,
    pub stochastic_bear_threshold: f64,
    pub macd_validator_enabled: bool,
    pub ignore_bronze_signals: bool,

    // Risk shaping
    /// Minimum target move from entry, as a fraction of entry price.
    pub min_take_profit_pct: f64,
    pub atr_zone_multiplier: f64,
    pub stop_loss_atr_multiplier: f64,
    pub max_targets: usize,

    /// Evaluation timeframe string, e.g. "5m" or "1h".
    pub timeframe: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ema_fast_period: 9,
            ema_slow_period: 21,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            stochastic_period: 14,
            stochastic_smoothing: 3,
            atr_period: 14,
            adx_period: 14,
            adx_average_length: 21,
            adx_threshold: 25.0,
            rsi_validator_enabled: true,
            rsi_bull_threshold: 30.0,
            rsi_bear_threshold: 70.0,
            stochastic_validator_enabled: true,
            stochastic_bull_threshold: 20.0,
            stochastic_bear_threshold: 80.0,
            macd_validator_enabled: true,
            ignore_bronze_signals: false,
            min_take_profit_pct: 0.005,
            atr_zone_multiplier: 3.5,
            stop_loss_atr_multiplier: 8.0,
            max_targets: 20,
            timeframe: "5m".to_string(),
        }
    }
}

impl Config {
    /// Build from the process environment, falling back to defaults for
    /// anything unset. `.env` files are honored via dotenvy.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        read_usize("EMA_FAST_PERIOD", &mut config.ema_fast_period);
        read_usize("EMA_SLOW_PERIOD", &mut config.ema_slow_period);
        read_usize("RSI_PERIOD", &mut config.rsi_period);
        read_usize("MACD_FAST", &mut config.macd_fast);
        read_usize("MACD_SLOW", &mut config.macd_slow);
        read_usize("MACD_SIGNAL", &mut config.macd_signal);
        read_usize("BOLLINGER_PERIOD", &mut config.bollinger_period);
        read_f64("BOLLINGER_STD_DEV", &mut config.bollinger_std_dev);
        read_usize("STOCHASTIC_PERIOD", &mut config.stochastic_period);
        read_usize("STOCHASTIC_SMOOTHING", &mut config.stochastic_smoothing);
        read_usize("ATR_PERIOD", &mut config.atr_period);
        read_usize("ADX_PERIOD", &mut config.adx_period);
        read_usize("ADX_AVERAGE_LENGTH", &mut config.adx_average_length);
        read_f64("ADX_THRESHOLD", &mut config.adx_threshold);
        read_bool("RSI_VALIDATOR_ENABLED", &mut config.rsi_validator_enabled);
        read_f64("RSI_BULL_THRESHOLD", &mut config.rsi_bull_threshold);
        read_f64("RSI_BEAR_THRESHOLD", &mut config.rsi_bear_threshold);
        read_bool(
            "STOCHASTIC_VALIDATOR_ENABLED",
            &mut config.stochastic_validator_enabled,
        );
        read_f64(
            "STOCHASTIC_BULL_THRESHOLD",
            &mut config.stochastic_bull_threshold,
        );
        read_f64(
            "STOCHASTIC_BEAR_THRESHOLD",
            &mut config.stochastic_bear_threshold,
        );
        read_bool("MACD_VALIDATOR_ENABLED", &mut config.macd_validator_enabled);
        read_bool("IGNORE_BRONZE_SIGNALS", &mut config.ignore_bronze_signals);
        read_f64("MIN_TAKE_PROFIT_PCT", &mut config.min_take_profit_pct);
        read_f64("ATR_ZONE_MULTIPLIER", &mut config.atr_zone_multiplier);
        read_f64(
            "STOP_LOSS_ATR_MULTIPLIER",
            &mut config.stop_loss_atr_multiplier,
        );
        read_usize("MAX_TARGETS", &mut config.max_targets);
        if let Ok(value) = std::env::var("TIMEFRAME") {
            if !value.is_empty() {
                config.timeframe = value;
            }
        }

        config
    }

    /// Parse a configuration document, e.g. one stored alongside a strategy.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn read_usize(key: &str, slot: &mut usize) {
    if let Ok(value) = std::env::var(key) {
        if let Ok(parsed) = value.parse() {
            *slot = parsed;
        }
    }
}

fn read_f64(key: &str, slot: &mut f64) {
    if let Ok(value) = std::env::var(key) {
        if let Ok(parsed) = value.parse() {
            *slot = parsed;
        }
    }
}

fn read_bool(key: &str, slot: &mut bool) {
    if let Ok(value) = std::env::var(key) {
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => *slot = true,
            "0" | "false" | "no" | "off" => *slot = false,
            _ => {}
        }
    }
}
