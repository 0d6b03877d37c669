//! Error types for orderflow.
//!
//! The order aggregator never fails, and the retry executor hands back the
//! operation's own error untouched, so this taxonomy only covers the
//! configuration, user lookup and validation surfaces.

use thiserror::Error;

/// The main error type for orderflow operations.
#[derive(Debug, Error)]
pub enum OrderflowError {
    /// A configuration value was rejected.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A record failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A user lookup was attempted with an id below 1.
    #[error("Invalid ID: {0}")]
    InvalidUserId(i64),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for OrderflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error raised when a record fails a field-level check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The error message.
    pub message: String,
    /// The field that failed validation.
    pub field: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
        }
    }
}

/// Error raised when a configuration value is out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid configuration for '{field}': {reason}")]
pub struct ConfigError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
