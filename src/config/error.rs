//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Request timeout must be between 1 and 120 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Server host must be an IP address, got '{0}'")]
    InvalidAddress(String),

    #[error("Reviewer key must be at least {0} characters")]
    ReviewerKeyTooShort(usize),

    #[error("Results file name must not be empty")]
    EmptyResultsFile,

    #[error("Catalog directory does not exist: {0}")]
    CatalogDirMissing(String),
}
