//! Typed settings read from `DEEP_IDENTITY__*` environment variables.
//!
//! A `.env` file in the working directory is honoured during development.
//! Sections map to nested keys with `__`, so
//! `DEEP_IDENTITY__STORAGE__DATA_DIR=/var/lib/deep-identity` sets
//! `storage.data_dir`. Only `reviewer.key` has no default.
//!
//! ```no_run
//! use deep_identity::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

mod catalog;
mod error;
mod reviewer;
mod server;
mod storage;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use reviewer::{ReviewerConfig, MIN_REVIEWER_KEY_LENGTH};
pub use server::{LogFormat, ServerConfig, MAX_REQUEST_TIMEOUT_SECS};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "DEEP_IDENTITY";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub reviewer: ReviewerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Reads `.env` (if any) and the process environment.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when the reviewer key is missing or a value
    /// does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.reviewer.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}
