//! Candidate outcomes from either snapshot shape

use crate::label;
use crate::multiplier::multiplier;
use crate::outcome::CandidateOutcome;
use oddsboard_core::{OldFormatMarket, RawMarketRecord};

/// Label of the synthetic "No" side of a binary market
pub const NO_LABEL: &str = "No";

/// Flatten a market record into candidate outcomes
///
/// New-format outcomes map one to one. Old-format events yield one candidate
/// per sub-market, plus a "No" candidate when the event is a single Yes/No
/// market. Unrecognized records yield nothing.
pub fn adapt(market: &RawMarketRecord) -> Vec<CandidateOutcome> {
    match market {
        RawMarketRecord::New(market) => market
            .outcomes
            .iter()
            .map(|outcome| {
                CandidateOutcome::new(
                    label::outcome_name(&outcome.name),
                    outcome.probability,
                    multiplier(outcome.probability),
                    multiplier(1.0 - outcome.probability),
                )
            })
            .collect(),
        RawMarketRecord::Old(market) => adapt_old(market),
        RawMarketRecord::Unrecognized(_) => Vec::new(),
    }
}

fn adapt_old(market: &OldFormatMarket) -> Vec<CandidateOutcome> {
    let mut candidates = Vec::with_capacity(market.markets.len() + 1);

    // A broken price list only affects its own sub-market
    for sub_market in &market.markets {
        let (yes_price, no_price) = sub_market.parse_outcome_prices();
        candidates.push(CandidateOutcome::new(
            label::clean(&sub_market.question, &market.title),
            yes_price,
            multiplier(yes_price),
            multiplier(no_price),
        ));
    }

    if let [only] = market.markets.as_slice() {
        if only.has_yes_no_outcomes() {
            let (yes_price, no_price) = only.parse_outcome_prices();
            candidates.push(CandidateOutcome::new(
                NO_LABEL,
                no_price,
                multiplier(no_price),
                multiplier(yes_price),
            ));
        }
    }

    candidates
}
