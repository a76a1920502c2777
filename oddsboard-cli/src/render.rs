//! Card and table views of a sorted market list

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use oddsboard_core::{RawMarketRecord, SnapshotFormat};
use oddsboard_ranking::{BestOutcome, CandidateOutcome, RankingEngine};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// One block per market with its top outcomes
    Cards,
    /// One row per market with its best outcome
    Table,
}

/// Everything the views show for one market
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketView {
    pub title: String,
    pub format: SnapshotFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub volume: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub best: BestOutcome,
    pub outcomes: Vec<CandidateOutcome>,
}

impl MarketView {
    pub fn build(engine: &RankingEngine, market: &RawMarketRecord) -> Self {
        Self {
            title: market.title().to_string(),
            format: market.format(),
            url: market.url(),
            image: market.image().map(str::to_string),
            volume: market.volume(),
            end_date: market.end_date(),
            best: engine.best_outcome(market),
            outcomes: engine.display_outcomes(market),
        }
    }
}

#[derive(Tabled)]
struct MarketRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Prob")]
    probability: String,
    #[tabled(rename = "Yes")]
    yes: String,
    #[tabled(rename = "No")]
    no: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Ends")]
    ends: String,
}

impl From<&MarketView> for MarketRow {
    fn from(view: &MarketView) -> Self {
        Self {
            event: view.title.clone(),
            outcome: view.best.name.clone(),
            probability: format_probability(view.best.probability),
            yes: format!("{}x", view.best.yes_multiplier),
            no: format!("{}x", view.best.no_multiplier),
            volume: format_volume(view.volume),
            ends: format_end_date(view.end_date),
        }
    }
}

/// One row per market with its best outcome
pub fn render_table(views: &[MarketView]) -> String {
    let mut table = Table::new(views.iter().map(MarketRow::from));
    table.with(Style::rounded());
    table.to_string()
}

/// One block per market with its display outcomes
pub fn render_cards(views: &[MarketView]) -> String {
    let mut out = String::new();

    for view in views {
        let _ = writeln!(out, "{}", view.title);
        let _ = writeln!(
            out,
            "  {} volume · ends {}",
            format_volume(view.volume),
            format_end_date(view.end_date)
        );
        if let Some(url) = &view.url {
            let _ = writeln!(out, "  {}", url);
        }

        if view.outcomes.is_empty() {
            let _ = writeln!(out, "  (no outcomes)");
        }
        for outcome in &view.outcomes {
            let _ = writeln!(
                out,
                "  {:<28} {:>6}   yes {:>5}x   no {:>5}x",
                outcome.label,
                format_probability(outcome.probability),
                outcome.yes_multiplier.to_string(),
                outcome.no_multiplier.to_string()
            );
        }
        out.push('\n');
    }

    out
}

/// Percentage with one decimal, e.g. "41.0%"
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Compact dollar volume, e.g. "$2.4M"
pub fn format_volume(volume: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);

    if volume >= million {
        format!("${}M", (volume / million).round_dp(1).normalize())
    } else if volume >= thousand {
        format!("${}k", (volume / thousand).round_dp(1).normalize())
    } else {
        format!("${}", volume.round_dp(0).normalize())
    }
}

fn format_end_date(end_date: Option<DateTime<Utc>>) -> String {
    end_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
