//! Payout multipliers implied by outcome probabilities

use serde::{Serialize, Serializer};
use std::fmt;

/// Multipliers at or above this are shown as whole numbers
const WHOLE_NUMBER_THRESHOLD: f64 = 10.0;

/// Payout multiplier for a stake on an outcome
///
/// Kept numeric until display. `Unavailable` renders as `~`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Multiplier {
    Value(f64),
    Unavailable,
}

impl Multiplier {
    /// Numeric multiplier, if one exists
    pub fn value(&self) -> Option<f64> {
        match self {
            Multiplier::Value(v) => Some(*v),
            Multiplier::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Multiplier::Value(_))
    }
}

/// Multiplier implied by `probability` (`1 / probability`)
///
/// Zero, negative and non-finite probabilities have no multiplier, and neither
/// do probabilities so small that the reciprocal overflows.
pub fn multiplier(probability: f64) -> Multiplier {
    if !probability.is_finite() || probability <= 0.0 {
        return Multiplier::Unavailable;
    }

    let value = 1.0 / probability;
    if value.is_finite() {
        Multiplier::Value(value)
    } else {
        Multiplier::Unavailable
    }
}

/// Display string for the multiplier implied by `probability`
pub fn format_multiplier(probability: f64) -> String {
    multiplier(probability).to_string()
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Multiplier::Unavailable => f.write_str("~"),
            Multiplier::Value(v) if v >= WHOLE_NUMBER_THRESHOLD => write!(f, "{:.0}", v.round()),
            Multiplier::Value(v) => {
                // Round half up to tenths, then drop a trailing ".0"
                let tenths = format!("{:.1}", (v * 10.0).round() / 10.0);
                f.write_str(tenths.strip_suffix(".0").unwrap_or(&tenths))
            }
        }
    }
}

impl Serialize for Multiplier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
