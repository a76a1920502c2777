//! Core types for the Odds Board dashboard
//!
//! This crate defines the shared data structures used across the dashboard:
//! the two snapshot market shapes, the classified record that wraps them,
//! and the sort state threaded through the rendering layer.

pub mod error;
pub mod market;
pub mod sort;

mod lenient;

pub use error::{DashboardError, DashboardResult};
pub use market::{
    MarketMetrics, NamedOutcome, NewFormatMarket, OldFormatMarket, OldSubMarket,
    RawMarketRecord, SnapshotFormat,
};
pub use sort::{SortColumn, SortDirection, SortSpec};
