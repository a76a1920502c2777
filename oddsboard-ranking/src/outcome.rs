//! Outcome types produced by the ranking engine

use crate::multiplier::Multiplier;
use serde::Serialize;

/// Name used when a market has no outcome to show
pub const PLACEHOLDER_NAME: &str = "N/A";

/// An outcome derived from a market record, before tier selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateOutcome {
    /// Short label shown next to the probability (never empty)
    pub label: String,
    /// Implied probability (0.0 - 1.0)
    pub probability: f64,
    /// Payout multiplier for backing this outcome
    pub yes_multiplier: Multiplier,
    /// Payout multiplier for betting against this outcome
    pub no_multiplier: Multiplier,
    /// Ranking key, always equal to `probability`
    pub sort_key: f64,
}

impl CandidateOutcome {
    pub fn new(
        label: impl Into<String>,
        probability: f64,
        yes_multiplier: Multiplier,
        no_multiplier: Multiplier,
    ) -> Self {
        Self {
            label: label.into(),
            probability,
            yes_multiplier,
            no_multiplier,
            sort_key: probability,
        }
    }
}

/// The single most relevant outcome of a market, for compact views
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestOutcome {
    pub name: String,
    pub probability: f64,
    pub yes_multiplier: Multiplier,
    pub no_multiplier: Multiplier,
}

impl BestOutcome {
    /// Neutral value for markets without any outcome
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            probability: 0.0,
            yes_multiplier: Multiplier::Unavailable,
            no_multiplier: Multiplier::Unavailable,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME && !self.yes_multiplier.is_available()
    }
}

impl From<CandidateOutcome> for BestOutcome {
    fn from(candidate: CandidateOutcome) -> Self {
        Self {
            name: candidate.label,
            probability: candidate.probability,
            yes_multiplier: candidate.yes_multiplier,
            no_multiplier: candidate.no_multiplier,
        }
    }
}
