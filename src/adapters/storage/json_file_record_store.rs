//! JSON File Record Store Adapter
//!
//! Keeps every finished record in one pretty-printed JSON array, oldest
//! first. Appends are serialized through a lock and land through a
//! temporary file plus rename, so readers never see a half-written array.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::session::SessionRecord;
use crate::ports::{RecordStore, RecordStoreError};

#[derive(Debug, Clone)]
pub struct JsonFileRecordStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileRecordStore {
    /// Create a store backed by the JSON file at `path`
    ///
    /// The file and its parent directory are created on first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<SessionRecord>, RecordStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|e| RecordStoreError::IoError(e.to_string()))?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&json)
            .map_err(|e| RecordStoreError::DeserializationFailed(e.to_string()))
    }

    async fn write_all(&self, records: &[SessionRecord]) -> Result<(), RecordStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RecordStoreError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| RecordStoreError::SerializationFailed(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| RecordStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RecordStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    async fn append(&self, record: &SessionRecord) -> Result<usize, RecordStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_all().await?;
        records.push(record.clone());
        self.write_all(&records).await?;

        Ok(records.len() - 1)
    }

    async fn list(&self) -> Result<Vec<SessionRecord>, RecordStoreError> {
        self.read_all().await
    }

    async fn get(&self, index: usize) -> Result<SessionRecord, RecordStoreError> {
        self.read_all()
            .await?
            .into_iter()
            .nth(index)
            .ok_or(RecordStoreError::NotFound(index))
    }
}
