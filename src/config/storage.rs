//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where sessions and finished records are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for file-backed storage
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// JSON file holding finished records, relative to `data_dir` unless absolute
    #[serde(default = "default_results_file")]
    pub results_file: String,
}

/// Storage backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Everything is lost on restart
    Memory,
    #[default]
    File,
}

impl StorageConfig {
    /// Directory holding one YAML file per in-progress session
    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir.join("sessions")
    }

    /// Full path of the results file
    pub fn results_path(&self) -> PathBuf {
        self.data_dir.join(&self.results_file)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.results_file.trim().is_empty() {
            return Err(ValidationError::EmptyResultsFile);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            results_file: default_results_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_results_file() -> String {
    "deep_identity_results.json".to_string()
}
