//! Snapshot file decoding
//!
//! The pipeline writes either a bare array of market records or an envelope
//! `{ "markets": [...], "timestamp": "...", "count": N }`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use oddsboard_core::market::parse_calendar_date;
use oddsboard_core::{RawMarketRecord, SnapshotFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Envelope(SnapshotEnvelope),
    Bare(Vec<RawMarketRecord>),
}

#[derive(Debug, Deserialize)]
struct SnapshotEnvelope {
    markets: Vec<RawMarketRecord>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    count: Option<usize>,
}

/// Markets from one fetch cycle
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub markets: Vec<RawMarketRecord>,
    /// When the pipeline wrote the snapshot, if it said
    pub generated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Read and decode a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Failed to decode snapshot {}", path.display()))
    }

    /// Decode snapshot JSON
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: SnapshotFile =
            serde_json::from_str(raw).context("Snapshot is neither a market list nor an envelope")?;

        let snapshot = match file {
            SnapshotFile::Bare(markets) => Snapshot {
                markets,
                generated_at: None,
            },
            SnapshotFile::Envelope(envelope) => {
                if let Some(count) = envelope.count {
                    if count != envelope.markets.len() {
                        warn!(
                            "Snapshot declares {} markets but contains {}",
                            count,
                            envelope.markets.len()
                        );
                    }
                }
                Snapshot {
                    generated_at: envelope.timestamp.as_deref().and_then(parse_calendar_date),
                    markets: envelope.markets,
                }
            }
        };

        debug!("Decoded snapshot with {} markets", snapshot.markets.len());
        Ok(snapshot)
    }

    /// Number of markets per snapshot shape
    pub fn format_counts(&self) -> HashMap<SnapshotFormat, usize> {
        self.markets.iter().map(RawMarketRecord::format).counts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let snapshot = Snapshot::from_json_str(
            r#"[{"title": "A", "outcomes": [{"name": "Yes", "probability": 0.4}]}]"#,
        )
        .unwrap();
        assert_eq!(snapshot.markets.len(), 1);
        assert!(snapshot.generated_at.is_none());
    }

    #[test]
    fn test_envelope() {
        let snapshot = Snapshot::from_json_str(
            r#"{
                "markets": [
                    {"title": "A", "markets": [{"question": "A?", "outcomePrices": "[0.2, 0.8]"}]},
                    {"title": "B"}
                ],
                "timestamp": "2025-11-02T08:30:00+00:00",
                "count": 2
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.markets.len(), 2);
        assert!(snapshot.generated_at.is_some());

        let counts = snapshot.format_counts();
        assert_eq!(counts.get(&SnapshotFormat::Old), Some(&1));
        assert_eq!(counts.get(&SnapshotFormat::Unrecognized), Some(&1));
        assert_eq!(counts.get(&SnapshotFormat::New), None);
    }

    #[test]
    fn test_rejects_other_documents() {
        assert!(Snapshot::from_json_str(r#"{"title": "not a snapshot"}"#).is_err());
        assert!(Snapshot::from_json_str("nope").is_err());
    }
}
