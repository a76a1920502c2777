//! Sort state for the market table

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column the market list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortColumn {
    /// Event title, case-insensitive
    #[serde(rename = "event")]
    Event,
    /// Name of the best outcome, case-insensitive
    #[serde(rename = "outcome")]
    Outcome,
    /// Probability of the best outcome
    #[serde(rename = "probability")]
    Probability,
    /// Total volume, falling back to 24-hour volume
    #[serde(rename = "volume")]
    Volume,
    /// End date
    #[serde(rename = "endDate", alias = "end_date")]
    EndDate,
}

impl SortColumn {
    /// Wire name used by the rendering layer
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Event => "event",
            SortColumn::Outcome => "outcome",
            SortColumn::Probability => "probability",
            SortColumn::Volume => "volume",
            SortColumn::EndDate => "endDate",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortColumn {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "event" => Ok(SortColumn::Event),
            "outcome" => Ok(SortColumn::Outcome),
            "probability" => Ok(SortColumn::Probability),
            "volume" => Ok(SortColumn::Volume),
            "enddate" | "end_date" => Ok(SortColumn::EndDate),
            _ => Err(DashboardError::parse(format!("Unknown sort column: {}", s))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(DashboardError::parse(format!("Unknown sort direction: {}", s))),
        }
    }
}

/// Active sort column and direction
///
/// Owned by the rendering layer for the whole session and passed into the
/// sorter on every render. Only explicit user sort requests change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Apply a user request to sort by `column`
    ///
    /// The active column flips direction; any other column starts descending.
    pub fn request(&mut self, column: SortColumn) {
        *self = if self.column == column {
            SortSpec::new(column, self.direction.toggled())
        } else {
            SortSpec::new(column, SortDirection::Desc)
        };
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::new(SortColumn::Volume, SortDirection::Desc)
    }
}
