//! Tiered selection of outcomes worth displaying
//!
//! Multi-way ladder markets carry many rungs priced at structurally ~0% or
//! ~100%. Ordering by raw probability would show those placeholders first, so
//! outcomes are grouped into probability bands and the contested band is
//! preferred, degrading to the fringe band and then to everything.

use crate::outcome::CandidateOutcome;
use itertools::Itertools;
use std::collections::HashSet;

/// Maximum number of outcomes on a market card
pub const DISPLAY_LIMIT: usize = 5;

/// Probability band of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Contested: strictly between 1% and 99%
    Live,
    /// Near-certain either way: 0.1%-1% or 99%-99.9%
    Fringe,
}

impl Tier {
    /// Band for `probability`, `None` outside both bands
    pub fn of(probability: f64) -> Option<Tier> {
        if probability > 0.01 && probability < 0.99 {
            Some(Tier::Live)
        } else if (0.001..=0.01).contains(&probability) || (0.99..0.999).contains(&probability) {
            Some(Tier::Fringe)
        } else {
            None
        }
    }
}

/// How many outcomes a selection should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Up to five outcomes for a rich card
    Top5,
    /// The one outcome that best represents a ladder market
    Single,
}

/// Select outcomes for display according to `mode`
pub fn select(candidates: &[CandidateOutcome], mode: SelectionMode) -> Vec<CandidateOutcome> {
    match mode {
        SelectionMode::Top5 => select_top(candidates, DISPLAY_LIMIT),
        SelectionMode::Single => select_single(candidates).into_iter().collect(),
    }
}

/// Up to `limit` outcomes, highest probability first
///
/// Every live outcome is considered, then fringe outcomes, then anything
/// left, until `limit` is reached. A label is only taken once.
pub fn select_top(candidates: &[CandidateOutcome], limit: usize) -> Vec<CandidateOutcome> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected: Vec<&CandidateOutcome> = Vec::new();

    for candidate in in_tier(candidates, Tier::Live) {
        if seen.insert(candidate.label.as_str()) {
            selected.push(candidate);
        }
    }

    for candidate in in_tier(candidates, Tier::Fringe).chain(candidates.iter()) {
        if selected.len() >= limit {
            break;
        }
        if seen.insert(candidate.label.as_str()) {
            selected.push(candidate);
        }
    }

    selected
        .into_iter()
        .sorted_by(|a, b| b.probability.total_cmp(&a.probability))
        .take(limit)
        .cloned()
        .collect()
}

/// The highest outcome of the best populated tier
///
/// Falls back to the whole candidate list when no outcome is in either band.
pub fn select_single(candidates: &[CandidateOutcome]) -> Option<CandidateOutcome> {
    let live: Vec<&CandidateOutcome> = in_tier(candidates, Tier::Live).collect();
    let pool = if !live.is_empty() {
        live
    } else {
        let fringe: Vec<&CandidateOutcome> = in_tier(candidates, Tier::Fringe).collect();
        if !fringe.is_empty() {
            fringe
        } else {
            candidates.iter().collect()
        }
    };

    highest(pool)
        .or_else(|| candidates.first())
        .cloned()
}

/// First outcome with the highest probability
pub(crate) fn highest<'a>(
    candidates: impl IntoIterator<Item = &'a CandidateOutcome>,
) -> Option<&'a CandidateOutcome> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(best) if best.probability.total_cmp(&candidate.probability).is_ge() => Some(best),
        _ => Some(candidate),
    })
}

fn in_tier(
    candidates: &[CandidateOutcome],
    tier: Tier,
) -> impl Iterator<Item = &CandidateOutcome> + '_ {
    candidates
        .iter()
        .filter(move |candidate| Tier::of(candidate.probability) == Some(tier))
}
