//! Reviewer access configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Shortest reviewer key accepted at startup
pub const MIN_REVIEWER_KEY_LENGTH: usize = 12;

/// Reviewer configuration
#[derive(Debug, Deserialize)]
pub struct ReviewerConfig {
    /// Key expected in the `X-Reviewer-Key` header
    pub key: SecretString,
}

impl ReviewerConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::new(key.into()),
        }
    }

    /// Validate reviewer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.key.expose_secret();
        if key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("reviewer.key"));
        }
        if key.chars().count() < MIN_REVIEWER_KEY_LENGTH {
            return Err(ValidationError::ReviewerKeyTooShort(MIN_REVIEWER_KEY_LENGTH));
        }
        Ok(())
    }
}
