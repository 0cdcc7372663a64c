//! Error types for promptd.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, the upstream storage connector, the
//! prompt store, and composition.

use thiserror::Error;

/// Unified error type for promptd.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream storage connector errors (fetch failures, bad responses)
    #[error("Storage source error: {0}")]
    Source(String),

    /// Prompt store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Composition engine errors
    #[error("Compose error: {0}")]
    Compose(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

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
