//! One representative outcome per market, for dense views

use crate::adapter;
use crate::config::RankingConfig;
use crate::outcome::BestOutcome;
use crate::tier;
use oddsboard_core::RawMarketRecord;
use tracing::trace;

/// Pick the outcome that represents `market` in the table view
///
/// New-format markets show their most likely outcome. Old-format events do
/// the same unless their title marks them as a price ladder, in which case
/// the tiered single-outcome selection is used. Markets without any outcome
/// resolve to the "N/A" placeholder.
pub fn resolve(market: &RawMarketRecord, config: &RankingConfig) -> BestOutcome {
    let candidates = adapter::adapt(market);

    let best = match market {
        RawMarketRecord::Old(event) if config.is_price_ladder(&event.title) => {
            trace!(title = %event.title, "Resolving price ladder by tier");
            tier::select_single(&candidates)
        }
        _ => tier::highest(&candidates).cloned(),
    };

    best.map(BestOutcome::from)
        .unwrap_or_else(BestOutcome::placeholder)
}
