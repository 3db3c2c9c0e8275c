//! Error handling for tradeboard
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("trade log not found: {0}")]
    FileMissing(String),

    #[error("required column missing: {0}")]
    MissingColumn(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dashboard operations
pub type Result<T> = anyhow::Result<T>;
