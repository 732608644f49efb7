//! Strategy variants that consume snapshots and emit trade signals.

pub mod cypherpunk;
pub mod default_rules;
pub mod level;
pub mod promax;
pub mod risk;
pub mod selector;

use async_trait::async_trait;

use crate::models::signal::{EvalContext, TradeSignal};
use crate::models::snapshot::MarketSnapshot;

/// One pluggable rule set.
///
/// `analyze` is the whole contract: snapshot plus sizing, fee rate and the
/// external context in; a trade signal or an abstention out. Implementations
/// hold only static configuration and never mutate the snapshot.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Evaluate one market. `sizing` is the quote-denominated position
    /// size, `fee_rate` the taker fee fraction. `None` means no trade; any
    /// internal fault must resolve to `None` rather than surface.
    async fn analyze(
        &self,
        snapshot: &MarketSnapshot,
        sizing: f64,
        fee_rate: f64,
        ctx: &EvalContext,
    ) -> Option<TradeSignal>;
}

pub use cypherpunk::CypherPunkStrategy;
pub use default_rules::DefaultStrategy;
pub use level::LevelStrategy;
pub use promax::ProMaxStrategy;
pub use selector::{is_valid_strategy, select_strategy, valid_names};
