//! Strategy selection by configured name.

use std::sync::Arc;

use crate::config::Config;
use crate::strategies::{
    CypherPunkStrategy, DefaultStrategy, LevelStrategy, ProMaxStrategy, Strategy,
};

const VALID_NAMES: [&str; 4] = ["default", "promax", "cypherpunk", "level"];

/// Names the selector recognizes.
pub fn valid_names() -> &'static [&'static str] {
    &VALID_NAMES
}

/// Case-insensitive membership check.
pub fn is_valid_strategy(name: &str) -> bool {
    VALID_NAMES.contains(&name.to_ascii_lowercase().as_str())
}

/// Map a configured name onto a strategy instance. Unrecognized or absent
/// names resolve to the default strategy.
pub fn select_strategy(name: Option<&str>, config: &Config) -> Arc<dyn Strategy> {
    match name.map(str::to_ascii_lowercase).as_deref() {
        Some("promax") => Arc::new(ProMaxStrategy::new(config)),
        Some("cypherpunk") => Arc::new(CypherPunkStrategy::new(config)),
        Some("level") => Arc::new(LevelStrategy),
        _ => Arc::new(DefaultStrategy::new(config)),
    }
}
