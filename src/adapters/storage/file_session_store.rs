//! File-based Session Store Adapter
//!
//! Stores each in-progress session as one YAML file named after its id,
//! so a session can be inspected by hand while it is running.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::SessionId;
use crate::domain::session::QuestionnaireSession;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for questionnaire sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_file_path(&self, id: SessionId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, session: &QuestionnaireSession) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        let path = self.session_file_path(session.id());
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<QuestionnaireSession, SessionStoreError> {
        let path = self.session_file_path(id);
        if !path.exists() {
            return Err(SessionStoreError::NotFound(id));
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))
    }
}
