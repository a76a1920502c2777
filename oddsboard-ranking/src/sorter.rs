//! Ordering of the market list by the active sort column

use crate::config::RankingConfig;
use crate::resolver;
use oddsboard_core::{RawMarketRecord, SortColumn, SortDirection, SortSpec};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use tracing::trace;

/// Key a market is ordered by, extracted once per sort
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Text(String),
    Probability(f64),
    Volume(Decimal),
    /// Milliseconds since the epoch, zero when the date is missing
    Timestamp(i64),
}

impl SortKey {
    fn extract(market: &RawMarketRecord, column: SortColumn, config: &RankingConfig) -> Self {
        match column {
            SortColumn::Event => SortKey::Text(market.title().to_lowercase()),
            SortColumn::Outcome => {
                SortKey::Text(resolver::resolve(market, config).name.to_lowercase())
            }
            SortColumn::Probability => {
                SortKey::Probability(resolver::resolve(market, config).probability)
            }
            SortColumn::Volume => SortKey::Volume(market.volume()),
            SortColumn::EndDate => SortKey::Timestamp(
                market
                    .end_date()
                    .map(|date| date.timestamp_millis())
                    .unwrap_or(0),
            ),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Probability(a), SortKey::Probability(b)) => a.total_cmp(b),
            (SortKey::Volume(a), SortKey::Volume(b)) => a.cmp(b),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            // Every key of one sort comes from the same column
            _ => Ordering::Equal,
        }
    }
}

/// Sort markets by `spec`, leaving the input untouched
///
/// The sort is stable: markets with equal keys keep their relative order in
/// both directions.
pub fn sort_markets(
    markets: &[RawMarketRecord],
    spec: SortSpec,
    config: &RankingConfig,
) -> Vec<RawMarketRecord> {
    let mut keyed: Vec<(SortKey, &RawMarketRecord)> = markets
        .iter()
        .map(|market| (SortKey::extract(market, spec.column, config), market))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Asc => a.compare(b),
        SortDirection::Desc => b.compare(a),
    });

    trace!(
        column = %spec.column,
        direction = %spec.direction,
        count = keyed.len(),
        "Sorted markets"
    );

    keyed.into_iter().map(|(_, market)| market.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn market(title: &str, probability: f64, volume: f64, end_date: &str) -> RawMarketRecord {
        RawMarketRecord::classify(json!({
            "title": title,
            "outcomes": [{"name": format!("{} outcome", title), "probability": probability}],
            "metrics": {"total_volume": volume},
            "end_date": end_date
        }))
    }

    fn titles(markets: &[RawMarketRecord]) -> Vec<&str> {
        markets.iter().map(RawMarketRecord::title).collect()
    }

    fn sample() -> Vec<RawMarketRecord> {
        vec![
            market("beta", 0.2, 500.0, "2025-06-01"),
            market("Alpha", 0.9, 100.0, "2025-01-01"),
            market("gamma", 0.5, 900.0, "2026-01-01"),
        ]
    }

    #[test]
    fn test_sort_by_event_is_case_insensitive() {
        let config = RankingConfig::default();
        let sorted = sort_markets(
            &sample(),
            SortSpec::new(SortColumn::Event, SortDirection::Asc),
            &config,
        );
        assert_eq!(titles(&sorted), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_sort_by_probability_desc() {
        let config = RankingConfig::default();
        let sorted = sort_markets(
            &sample(),
            SortSpec::new(SortColumn::Probability, SortDirection::Desc),
            &config,
        );
        assert_eq!(titles(&sorted), vec!["Alpha", "gamma", "beta"]);
    }

    #[test]
    fn test_sort_by_volume_and_end_date() {
        let config = RankingConfig::default();
        let by_volume = sort_markets(&sample(), SortSpec::default(), &config);
        assert_eq!(titles(&by_volume), vec!["gamma", "beta", "Alpha"]);

        let by_date = sort_markets(
            &sample(),
            SortSpec::new(SortColumn::EndDate, SortDirection::Asc),
            &config,
        );
        assert_eq!(titles(&by_date), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_missing_end_date_sorts_as_epoch() {
        let config = RankingConfig::default();
        let markets = vec![
            market("dated", 0.5, 1.0, "2025-01-01"),
            market("undated", 0.5, 1.0, "someday"),
        ];
        let sorted = sort_markets(
            &markets,
            SortSpec::new(SortColumn::EndDate, SortDirection::Asc),
            &config,
        );
        assert_eq!(titles(&sorted), vec!["undated", "dated"]);
    }

    #[test]
    fn test_end_date_spellings_sort_together() {
        let config = RankingConfig::default();
        let markets = vec![
            market("dated", 0.5, 1.0, "2025-01-01"),
            RawMarketRecord::classify(json!({
                "title": "new-camel",
                "outcomes": [{"name": "Yes", "probability": 0.5}],
                "endDate": "2030-01-01"
            })),
            RawMarketRecord::classify(json!({
                "title": "old-snake",
                "markets": [{"question": "old-snake?", "outcomePrices": "[0.5, 0.5]"}],
                "end_date": "2027-01-01"
            })),
        ];
        let sorted = sort_markets(
            &markets,
            SortSpec::new(SortColumn::EndDate, SortDirection::Desc),
            &config,
        );
        assert_eq!(titles(&sorted), vec!["new-camel", "old-snake", "dated"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let config = RankingConfig::default();
        let markets = sample();
        let _ = sort_markets(&markets, SortSpec::default(), &config);
        assert_eq!(titles(&markets), vec!["beta", "Alpha", "gamma"]);
    }
}
