//! Question catalog configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::ValidationError;
use crate::domain::catalog::{Catalog, CatalogError};

/// Catalog source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Directory with `block1.yaml`, `block2.yaml` and `block3.yaml`.
    /// The embedded catalog is used when unset.
    pub dir: Option<PathBuf>,
}

impl CatalogConfig {
    /// Load the configured catalog, checking its integrity
    pub fn load(&self) -> Result<Arc<Catalog>, CatalogError> {
        match &self.dir {
            Some(dir) => Catalog::from_dir(dir).map(Arc::new),
            None => Catalog::builtin(),
        }
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.dir {
            Some(dir) if !dir.is_dir() => {
                Err(ValidationError::CatalogDirMissing(dir.display().to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_dir_loads_builtin_catalog() {
        let catalog = CatalogConfig::default().load().unwrap();
        assert_eq!(catalog.childhood.sequence().len(), 15);
    }

    #[test]
    fn missing_dir_fails_validation() {
        let config = CatalogConfig {
            dir: Some(PathBuf::from("/definitely/not/here")),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::CatalogDirMissing(_))
        ));
    }
}
