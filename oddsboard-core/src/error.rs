//! Error types for the dashboard

use thiserror::Error;

/// Dashboard-wide error type
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn parse(msg: impl Into<String>) -> Self {
        DashboardError::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        DashboardError::Config(msg.into())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
