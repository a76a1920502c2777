use oddsboard_core::{RawMarketRecord, SortColumn, SortDirection, SortSpec};
use oddsboard_ranking::{
    adapter, format_multiplier, multiplier, tier, BestOutcome, CandidateOutcome, Multiplier,
    RankingConfig, RankingEngine, SelectionMode,
};
use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::HashSet;

fn snapshot() -> Vec<RawMarketRecord> {
    let raw = json!([
        {
            "title": "What price will Bitcoin hit in 2025?",
            "markets": [
                {"question": "Will Bitcoin reach $80,000 by December 31?", "outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"0.995\", \"0.005\"]"},
                {"question": "Will Bitcoin reach $120,000 by December 31?", "outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"0.41\", \"0.59\"]"},
                {"question": "Will Bitcoin reach $150,000 by December 31?", "outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"0.07\", \"0.93\"]"},
                {"question": "Will Bitcoin reach $250,000 by December 31?", "outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"0.0005\", \"0.9995\"]"}
            ],
            "volume24hr": 2400000,
            "endDate": "2025-12-31T12:00:00Z",
            "slug": "what-price-will-bitcoin-hit-in-2025"
        },
        {
            "title": "Fed decision in December?",
            "outcomes": [
                {"name": "25 bps decrease", "probability": 0.81},
                {"name": "No change", "probability": 0.17},
                {"name": "50+ bps decrease", "probability": 0.02}
            ],
            "metrics": {"total_volume": 5100000},
            "end_date": "2025-12-10",
            "url": "https://polymarket.com/event/fed-decision-in-december"
        },
        {
            "title": "X",
            "markets": [{"question": "Will X happen?", "outcomes": ["Yes", "No"], "outcomePrices": "[0.3,0.7]"}],
            "volume24hr": "12000",
            "endDate": "2026-03-01"
        },
        {
            "title": "Broken feed",
            "volume24hr": 50
        }
    ]);

    serde_json::from_value(raw).unwrap()
}

fn titles(markets: &[RawMarketRecord]) -> Vec<String> {
    markets.iter().map(|m| m.title().to_string()).collect()
}

fn candidate(label: &str, probability: f64) -> CandidateOutcome {
    CandidateOutcome::new(label, probability, multiplier(probability), multiplier(1.0 - probability))
}

#[test]
fn test_old_format_binary_scenario() {
    let market = RawMarketRecord::classify(json!({
        "title": "X",
        "markets": [{"question": "Will X happen?", "outcomePrices": "[0.3,0.7]"}]
    }));

    let candidates = adapter::adapt(&market);
    let yes = &candidates[0];
    assert_eq!(yes.label, "happen");
    assert_eq!(yes.probability, 0.3);
    assert_eq!(yes.yes_multiplier.to_string(), "3.3");
    assert_eq!(yes.no_multiplier.to_string(), "1.4");
}

#[test]
fn test_malformed_prices_scenario() {
    let market = RawMarketRecord::classify(json!({
        "title": "Rain",
        "markets": [{"question": "Will it rain?", "outcomePrices": "not-json"}]
    }));

    let candidates = adapter::adapt(&market);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].probability, 0.0);
    assert_eq!(candidates[0].yes_multiplier.to_string(), "~");
    assert_eq!(candidates[0].no_multiplier.to_string(), "~");
}

#[test]
fn test_single_mode_skips_placeholder_rungs() {
    let market = RawMarketRecord::classify(json!({
        "title": "Bitcoin price on Friday",
        "outcomes": [
            {"name": "A", "probability": 0.005},
            {"name": "B", "probability": 0.995},
            {"name": "C", "probability": 0.4}
        ]
    }));

    let selected = tier::select(&adapter::adapt(&market), SelectionMode::Single);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].label, "C");
}

#[test]
fn test_multiplier_sentinel() {
    assert_eq!(format_multiplier(0.0), "~");
    assert_eq!(format_multiplier(f64::NAN), "~");
    assert_eq!(multiplier(-1.0), Multiplier::Unavailable);
}

#[test]
fn test_top5_properties() {
    let pools: Vec<Vec<CandidateOutcome>> = vec![
        vec![],
        vec![candidate("Only", 0.5)],
        (0..12)
            .map(|i| candidate(&format!("R{}", i), i as f64 / 11.0))
            .collect(),
        vec![
            candidate("Dup", 0.3),
            candidate("Dup", 0.6),
            candidate("Other", 0.0005),
            candidate("Edge", 0.999),
            candidate("Low", 0.002),
        ],
        (0..8).map(|i| candidate(&format!("Z{}", i), 0.0)).collect(),
    ];

    for pool in &pools {
        let top = tier::select(pool, SelectionMode::Top5);
        assert!(top.len() <= 5);
        assert!(top.iter().all(|c| pool.contains(c)));

        let labels: HashSet<&str> = top.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels.len(), top.len());

        assert!(top.windows(2).all(|w| w[0].probability >= w[1].probability));
    }
}

#[test]
fn test_best_outcome_bounds() {
    let engine = RankingEngine::default();

    for market in &snapshot() {
        let best = engine.best_outcome(market);
        assert!((0.0..=1.0).contains(&best.probability));
        assert_eq!(best.is_placeholder(), engine.candidates(market).is_empty());
    }
}

#[test]
fn test_engine_views() {
    let engine = RankingEngine::default();
    let markets = snapshot();

    let ladder = engine.display_outcomes(&markets[0]);
    let labels: Vec<&str> = ladder.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["$80,000", "$120,000", "$150,000", "$250,000"]);
    assert_eq!(engine.best_outcome(&markets[0]).name, "$120,000");

    let fed = engine.best_outcome(&markets[1]);
    assert_eq!(fed.name, "25 bps decrease");
    assert_eq!(fed.yes_multiplier.to_string(), "1.2");
    assert_eq!(fed.no_multiplier.to_string(), "5.3");

    let binary = engine.best_outcome(&markets[2]);
    assert_eq!(binary.name, "No");

    assert_eq!(engine.best_outcome(&markets[3]), BestOutcome::placeholder());
    assert_eq!(markets[2].volume(), dec!(12000));
}

#[test]
fn test_display_limit_from_config() {
    let engine = RankingEngine::new(RankingConfig {
        display_limit: 2,
        ..RankingConfig::default()
    });
    let markets = snapshot();
    let ladder = engine.display_outcomes(&markets[0]);
    assert_eq!(ladder.len(), 2);
    assert_eq!(ladder[0].label, "$120,000");
}

#[test]
fn test_sort_is_idempotent() {
    let engine = RankingEngine::default();
    let markets = snapshot();

    for column in [
        SortColumn::Event,
        SortColumn::Outcome,
        SortColumn::Probability,
        SortColumn::Volume,
        SortColumn::EndDate,
    ] {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let spec = SortSpec::new(column, direction);
            let once = engine.sort(&markets, spec);
            let twice = engine.sort(&once, spec);
            assert_eq!(titles(&once), titles(&twice), "{} {}", column, direction);
        }
    }
}

#[test]
fn test_asc_reverses_desc_without_ties() {
    let engine = RankingEngine::default();
    let markets = snapshot();

    for column in [SortColumn::Event, SortColumn::Volume, SortColumn::EndDate] {
        let asc = titles(&engine.sort(&markets, SortSpec::new(column, SortDirection::Asc)));
        let mut desc = titles(&engine.sort(&markets, SortSpec::new(column, SortDirection::Desc)));
        desc.reverse();
        assert_eq!(asc, desc, "{}", column);
    }
}

#[test]
fn test_tied_keys_keep_input_order() {
    let engine = RankingEngine::default();
    let markets: Vec<RawMarketRecord> = ["first", "second", "third", "fourth"]
        .iter()
        .map(|title| {
            RawMarketRecord::classify(json!({
                "title": title,
                "outcomes": [{"name": "Yes", "probability": 0.5}],
                "metrics": {"total_volume": 1000}
            }))
        })
        .collect();

    for direction in [SortDirection::Asc, SortDirection::Desc] {
        for column in [SortColumn::Volume, SortColumn::Probability, SortColumn::Outcome] {
            let sorted = engine.sort(&markets, SortSpec::new(column, direction));
            assert_eq!(titles(&sorted), vec!["first", "second", "third", "fourth"]);
        }
    }
}

#[test]
fn test_sort_state_drives_order() {
    let engine = RankingEngine::default();
    let markets = snapshot();
    let mut spec = SortSpec::default();

    assert_eq!(
        titles(&engine.sort(&markets, spec))[0],
        "Fed decision in December?"
    );

    spec.request(SortColumn::Volume);
    assert_eq!(spec.direction, SortDirection::Asc);
    assert_eq!(titles(&engine.sort(&markets, spec))[0], "Broken feed");

    spec.request(SortColumn::EndDate);
    assert_eq!(spec, SortSpec::new(SortColumn::EndDate, SortDirection::Desc));
    assert_eq!(titles(&engine.sort(&markets, spec))[0], "X");
}
