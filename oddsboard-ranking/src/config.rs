//! Ranking engine configuration

use crate::tier::DISPLAY_LIMIT;
use oddsboard_core::DashboardError;
use serde::{Deserialize, Serialize};
use std::env;

/// Asset keywords that mark a title as a price ladder (with the word "price")
pub const DEFAULT_LADDER_ASSETS: [&str; 9] = [
    "bitcoin", "btc", "ethereum", "eth", "solana", "sol", "xrp", "dogecoin", "doge",
];

const LADDER_MARKER: &str = "price";

const DISPLAY_LIMIT_VAR: &str = "ODDSBOARD_DISPLAY_LIMIT";
const LADDER_ASSETS_VAR: &str = "ODDSBOARD_LADDER_ASSETS";

/// Configuration for the ranking engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Maximum outcomes shown on a market card (1-5)
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
    /// Lowercase asset keywords used for price-ladder detection
    #[serde(default = "default_ladder_assets")]
    pub ladder_assets: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            display_limit: default_display_limit(),
            ladder_assets: default_ladder_assets(),
        }
    }
}

impl RankingConfig {
    /// Load configuration from environment variables
    ///
    /// Reads (both optional):
    /// - ODDSBOARD_DISPLAY_LIMIT: outcomes per card, 1-5
    /// - ODDSBOARD_LADDER_ASSETS: comma-separated asset keywords
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var(DISPLAY_LIMIT_VAR) {
            config.display_limit = parse_display_limit(&raw)?;
        }

        if let Ok(raw) = env::var(LADDER_ASSETS_VAR) {
            config.ladder_assets = parse_asset_list(&raw)?;
        }

        Ok(config)
    }

    /// Check whether a market title describes a price ladder
    ///
    /// The title must mention "price" and name one of the ladder assets as a
    /// whole word, so "eth" does not match "whether".
    pub fn is_price_ladder(&self, title: &str) -> bool {
        let lowered = title.to_lowercase();
        if !lowered.contains(LADDER_MARKER) {
            return false;
        }

        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| {
                self.ladder_assets
                    .iter()
                    .any(|asset| asset.eq_ignore_ascii_case(word))
            })
    }
}

fn default_display_limit() -> usize {
    DISPLAY_LIMIT
}

fn default_ladder_assets() -> Vec<String> {
    DEFAULT_LADDER_ASSETS.iter().map(|a| a.to_string()).collect()
}

fn parse_display_limit(raw: &str) -> Result<usize, ConfigError> {
    let limit: usize = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: DISPLAY_LIMIT_VAR.to_string(),
        value: raw.to_string(),
    })?;

    if limit == 0 || limit > DISPLAY_LIMIT {
        return Err(ConfigError::OutOfRange {
            field: DISPLAY_LIMIT_VAR.to_string(),
            value: limit,
            max: DISPLAY_LIMIT,
        });
    }

    Ok(limit)
}

fn parse_asset_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let assets: Vec<String> = raw
        .split(',')
        .map(|asset| asset.trim().to_lowercase())
        .filter(|asset| !asset.is_empty())
        .collect();

    if assets.is_empty() {
        return Err(ConfigError::Empty {
            field: LADDER_ASSETS_VAR.to_string(),
        });
    }

    Ok(assets)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("{field} must be between 1 and {max}, got {value}")]
    OutOfRange { field: String, value: usize, max: usize },

    #[error("{field} cannot be empty")]
    Empty { field: String },
}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        DashboardError::config(err.to_string())
    }
}
