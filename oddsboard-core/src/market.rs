//! Market records as they appear in dashboard snapshots
//!
//! Two pipeline generations write snapshots with different market shapes and
//! neither carries a version tag. [`RawMarketRecord::classify`] looks at the
//! structure once and wraps the record in an explicit variant so the rest of
//! the dashboard can match on it exhaustively.

use crate::error::{DashboardError, DashboardResult};
use crate::lenient;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Base URL for Polymarket event pages
pub const POLYMARKET_EVENT_BASE: &str = "https://polymarket.com/event";

/// Naive datetime layouts accepted for end dates, read as UTC
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Which snapshot shape a record was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Flat `outcomes` list with explicit probabilities
    New,
    /// Gamma-style event with nested sub-markets
    Old,
    /// Neither shape
    Unrecognized,
}

impl SnapshotFormat {
    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SnapshotFormat::New => "new",
            SnapshotFormat::Old => "old",
            SnapshotFormat::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// New format
// ============================================================================

/// A single outcome of a new-format market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedOutcome {
    /// Outcome name (e.g., "Yes", "Trump", "$100k - $110k")
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,

    /// Implied probability (0.0 - 1.0)
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub probability: f64,
}

/// Aggregate metrics attached to a new-format market
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketMetrics {
    /// Lifetime traded volume in USD
    #[serde(
        default,
        deserialize_with = "lenient::optional_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_volume: Option<f64>,
}

/// A market written by the current pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFormatMarket {
    /// Human-readable title
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,

    /// Outcomes with their probabilities
    #[serde(default, deserialize_with = "lenient::objects")]
    pub outcomes: Vec<NamedOutcome>,

    /// Volume and other aggregates
    #[serde(
        default,
        deserialize_with = "lenient::optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics: Option<MarketMetrics>,

    /// 24-hour volume, present on some records
    #[serde(
        default,
        rename = "volume24hr",
        deserialize_with = "lenient::optional_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_24hr: Option<f64>,

    /// End date as written by the pipeline
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,

    /// End date under its camelCase key, read when `end_date` is absent
    #[serde(
        default,
        rename = "endDate",
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date_camel: Option<String>,

    /// URL to the market on the platform's website
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    /// Market icon URL
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<String>,

    /// Market image URL
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

// ============================================================================
// Old format
// ============================================================================

/// A sub-market of an old-format event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldSubMarket {
    /// Market question (usually repeats the event title)
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub question: String,

    /// Outcome prices, either an array or a JSON string (e.g., "[\"0.07\", \"0.93\"]")
    #[serde(default)]
    pub outcome_prices: Value,

    /// Outcome names, either an array or a JSON string (e.g., "[\"Yes\", \"No\"]")
    #[serde(default)]
    pub outcomes: Value,
}

impl OldSubMarket {
    /// Parse the (yes, no) prices
    ///
    /// Missing or non-numeric entries read as 0. An undecodable price list
    /// reads as `(0, 0)`.
    pub fn parse_outcome_prices(&self) -> (f64, f64) {
        let Some(prices) = lenient::json_array(&self.outcome_prices) else {
            debug!(
                question = %self.question,
                "Unreadable outcomePrices, substituting [0, 0]"
            );
            return (0.0, 0.0);
        };

        let price_at = |index: usize| prices.get(index).and_then(lenient::number).unwrap_or(0.0);
        (price_at(0), price_at(1))
    }

    /// Check whether the raw outcome names are exactly `["Yes", "No"]`
    pub fn has_yes_no_outcomes(&self) -> bool {
        matches!(
            lenient::json_array(&self.outcomes).as_deref(),
            Some([yes, no]) if yes == "Yes" && no == "No"
        )
    }
}

/// An event written by the legacy Gamma pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldFormatMarket {
    /// Event title
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,

    /// Sub-markets (one per outcome for grouped events)
    #[serde(default, deserialize_with = "lenient::objects")]
    pub markets: Vec<OldSubMarket>,

    /// Aggregates, present on events re-exported by the current pipeline
    #[serde(
        default,
        deserialize_with = "lenient::optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics: Option<MarketMetrics>,

    /// 24-hour volume
    #[serde(
        default,
        rename = "volume24hr",
        deserialize_with = "lenient::optional_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_24hr: Option<f64>,

    /// End date
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,

    /// End date under its snake_case key, preferred over `endDate`
    #[serde(
        default,
        rename = "end_date",
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date_snake: Option<String>,

    /// URL slug
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub slug: Option<String>,

    /// Event icon URL
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<String>,

    /// Event image URL
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

// ============================================================================
// Classified record
// ============================================================================

/// A market record from a snapshot, classified by shape
#[derive(Debug, Clone)]
pub enum RawMarketRecord {
    New(NewFormatMarket),
    Old(OldFormatMarket),
    /// Kept verbatim so title/volume/date lookups still work
    Unrecognized(Value),
}

impl RawMarketRecord {
    /// Classify a decoded JSON value
    ///
    /// A non-empty `outcomes` array wins over a non-empty `markets` array.
    /// Anything else is kept as [`RawMarketRecord::Unrecognized`].
    pub fn classify(value: Value) -> Self {
        if is_non_empty_array(value.get("outcomes")) {
            match serde_json::from_value::<NewFormatMarket>(value.clone()) {
                Ok(market) if !market.outcomes.is_empty() => return RawMarketRecord::New(market),
                Ok(_) => debug!("Record has outcomes but none are objects"),
                Err(e) => debug!("Failed to decode new-format record: {}", e),
            }
        }

        if is_non_empty_array(value.get("markets")) {
            match serde_json::from_value::<OldFormatMarket>(value.clone()) {
                Ok(market) if !market.markets.is_empty() => return RawMarketRecord::Old(market),
                Ok(_) => debug!("Record has markets but none are objects"),
                Err(e) => debug!("Failed to decode old-format record: {}", e),
            }
        }

        RawMarketRecord::Unrecognized(value)
    }

    /// Decode and classify a single record from JSON text
    pub fn from_json_str(raw: &str) -> DashboardResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DashboardError::parse(format!("Invalid market JSON: {}", e)))?;
        Ok(Self::classify(value))
    }

    /// Which shape this record was classified as
    pub fn format(&self) -> SnapshotFormat {
        match self {
            RawMarketRecord::New(_) => SnapshotFormat::New,
            RawMarketRecord::Old(_) => SnapshotFormat::Old,
            RawMarketRecord::Unrecognized(_) => SnapshotFormat::Unrecognized,
        }
    }

    /// Market title, empty when absent
    pub fn title(&self) -> &str {
        match self {
            RawMarketRecord::New(market) => &market.title,
            RawMarketRecord::Old(market) => &market.title,
            RawMarketRecord::Unrecognized(value) => {
                value.get("title").and_then(Value::as_str).unwrap_or("")
            }
        }
    }

    /// Volume used for ranking: total volume, then 24-hour volume, then zero
    pub fn volume(&self) -> Decimal {
        let volume = match self {
            RawMarketRecord::New(market) => market
                .metrics
                .as_ref()
                .and_then(|m| m.total_volume)
                .or(market.volume_24hr),
            RawMarketRecord::Old(market) => market
                .metrics
                .as_ref()
                .and_then(|m| m.total_volume)
                .or(market.volume_24hr),
            RawMarketRecord::Unrecognized(value) => value
                .pointer("/metrics/total_volume")
                .and_then(lenient::number)
                .or_else(|| value.get("volume24hr").and_then(lenient::number)),
        };

        volume.map(volume_to_decimal).unwrap_or(Decimal::ZERO)
    }

    /// Parsed end date, if present and readable
    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        let raw = match self {
            RawMarketRecord::New(market) => market
                .end_date
                .as_deref()
                .or(market.end_date_camel.as_deref()),
            RawMarketRecord::Old(market) => market
                .end_date_snake
                .as_deref()
                .or(market.end_date.as_deref()),
            RawMarketRecord::Unrecognized(value) => value
                .get("end_date")
                .and_then(Value::as_str)
                .or_else(|| value.get("endDate").and_then(Value::as_str)),
        };
        raw.and_then(parse_calendar_date)
    }

    /// URL to the market page
    pub fn url(&self) -> Option<String> {
        match self {
            RawMarketRecord::New(market) => market.url.clone(),
            RawMarketRecord::Old(market) => market
                .slug
                .as_ref()
                .map(|slug| format!("{}/{}", POLYMARKET_EVENT_BASE, slug)),
            RawMarketRecord::Unrecognized(_) => None,
        }
    }

    /// Icon or image URL, icon preferred
    pub fn image(&self) -> Option<&str> {
        match self {
            RawMarketRecord::New(market) => market.icon.as_deref().or(market.image.as_deref()),
            RawMarketRecord::Old(market) => market.icon.as_deref().or(market.image.as_deref()),
            RawMarketRecord::Unrecognized(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for RawMarketRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(RawMarketRecord::classify)
    }
}

impl Serialize for RawMarketRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RawMarketRecord::New(market) => market.serialize(serializer),
            RawMarketRecord::Old(market) => market.serialize(serializer),
            RawMarketRecord::Unrecognized(value) => value.serialize(serializer),
        }
    }
}

/// Convert a decoded volume, saturating values beyond `Decimal`'s range
fn volume_to_decimal(volume: f64) -> Decimal {
    Decimal::from_str(&volume.to_string()).unwrap_or_else(|_| {
        debug!(volume, "Volume outside decimal range, saturating");
        if volume.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

fn is_non_empty_array(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Array(items)) if !items.is_empty())
}

/// Parse a calendar date as written by either pipeline
///
/// Accepts RFC 3339, a naive datetime (read as UTC) or a bare `YYYY-MM-DD`
/// (UTC midnight).
pub fn parse_calendar_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
