//! Error types for the Retail Analytics Copilot.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, corpus loading, relational store
//! access, and agent pipeline errors.

use thiserror::Error;

/// Unified error type for the Retail Analytics Copilot.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated. Failures at
/// component boundaries (missing corpus, unreadable table, bad SQL) are
/// degraded to valid results before they reach the orchestrator; only
/// genuinely unrecoverable conditions surface as `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document corpus errors (missing docs directory, unreadable file)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Relational store errors (missing database, introspection failure)
    #[error("Store error: {0}")]
    Store(String),

    /// Agent pipeline errors
    #[error("Agent error: {0}")]
    Agent(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
