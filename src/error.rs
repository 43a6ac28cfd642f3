//! Error types for the sleep debt engine
//!
//! The debt algorithms themselves are total over well-formed input; errors only
//! arise at the boundaries: configuration validation and record parsing.

use thiserror::Error;

/// Errors that can occur while configuring the engine or loading records
#[derive(Debug, Error)]
pub enum DebtError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid sleep record for {date}: {reason}")]
    InvalidRecord { date: String, reason: String },
}
