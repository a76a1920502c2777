//! Outcome normalization and ranking for the Odds Board dashboard
//!
//! Turns market records from either snapshot shape into canonical outcomes:
//! - [`adapter`] flattens a record into candidate outcomes
//! - [`label`] recovers short labels from free-text questions
//! - [`multiplier`] derives payout multipliers from probabilities
//! - [`tier`] picks the outcomes worth showing on a card
//! - [`resolver`] reduces a market to one outcome for the table view
//! - [`sorter`] orders the market list by the active [`SortSpec`]
//!
//! Every operation is a pure function of its input. [`RankingEngine`] bundles
//! them with a [`RankingConfig`] for the rendering layer.

pub mod adapter;
pub mod config;
pub mod label;
pub mod multiplier;
pub mod outcome;
pub mod resolver;
pub mod sorter;
pub mod tier;

pub use config::{ConfigError, RankingConfig};
pub use multiplier::{format_multiplier, multiplier, Multiplier};
pub use outcome::{BestOutcome, CandidateOutcome};
pub use tier::{SelectionMode, Tier, DISPLAY_LIMIT};

use oddsboard_core::{RawMarketRecord, SortSpec};

/// Entry point used by the rendering layer
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// All candidate outcomes of a market, unfiltered
    pub fn candidates(&self, market: &RawMarketRecord) -> Vec<CandidateOutcome> {
        adapter::adapt(market)
    }

    /// Outcomes for a market card, highest probability first
    pub fn display_outcomes(&self, market: &RawMarketRecord) -> Vec<CandidateOutcome> {
        tier::select_top(&adapter::adapt(market), self.config.display_limit)
    }

    /// The single outcome shown for a market in the table view
    pub fn best_outcome(&self, market: &RawMarketRecord) -> BestOutcome {
        resolver::resolve(market, &self.config)
    }

    /// Markets ordered by `spec`
    pub fn sort(&self, markets: &[RawMarketRecord], spec: SortSpec) -> Vec<RawMarketRecord> {
        sorter::sort_markets(markets, spec, &self.config)
    }
}
