//! Odds Board terminal renderer
//!
//! Loads a dashboard snapshot, ranks every market and prints cards or a table.

mod render;
mod snapshot;

use clap::Parser;
use itertools::Itertools;
use oddsboard_core::{SortColumn, SortDirection, SortSpec};
use oddsboard_ranking::{RankingConfig, RankingEngine};
use render::{MarketView, View};
use snapshot::Snapshot;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Render a prediction market snapshot
#[derive(Parser, Debug)]
#[command(name = "oddsboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Snapshot JSON written by the fetch pipeline
    snapshot: PathBuf,

    /// Output layout
    #[arg(long, value_enum, default_value_t = View::Cards)]
    view: View,

    /// Column to sort by (event, outcome, probability, volume, endDate)
    #[arg(long, default_value = "volume")]
    sort: SortColumn,

    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,

    /// Print ranked markets as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,oddsboard=debug")),
        )
        .init();

    let cli = Cli::parse();

    let config = RankingConfig::from_env()?;
    info!(
        "Display limit {}, ladder assets: {}",
        config.display_limit,
        config.ladder_assets.join(",")
    );
    let engine = RankingEngine::new(config);

    let snapshot = Snapshot::load(&cli.snapshot)?;
    let summary = snapshot
        .format_counts()
        .into_iter()
        .sorted_by_key(|(format, _)| format.display_name())
        .map(|(format, count)| format!("{} {}", count, format))
        .join(", ");
    info!("Loaded {} markets ({})", snapshot.markets.len(), summary);
    if let Some(generated_at) = snapshot.generated_at {
        info!("Snapshot written at {}", generated_at);
    }

    let direction = if cli.asc {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    let spec = SortSpec::new(cli.sort, direction);

    let views: Vec<MarketView> = engine
        .sort(&snapshot.markets, spec)
        .iter()
        .map(|market| MarketView::build(&engine, market))
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    match cli.view {
        View::Cards => print!("{}", render::render_cards(&views)),
        View::Table => println!("{}", render::render_table(&views)),
    }

    Ok(())
}
