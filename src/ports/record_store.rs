//! Record store port - append-only collection of finished session records.
//!
//! Records are addressed by insertion order only. The store never updates
//! or deletes a record.

use async_trait::async_trait;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::session::{RecordSummary, SessionError, SessionRecord};

/// Errors that can occur during record store operations
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("Record not found at index {0}")]
    NotFound(usize),

    #[error("Failed to serialize records: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize records: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl RecordStoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecordStoreError::NotFound(_) => ErrorCode::RecordNotFound,
            _ => ErrorCode::StorageError,
        }
    }
}

impl From<RecordStoreError> for SessionError {
    fn from(err: RecordStoreError) -> Self {
        SessionError::storage(err.to_string())
    }
}

/// Port for the append-only record collection
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one record.
    ///
    /// # Returns
    /// The zero-based index the record was stored at
    async fn append(&self, record: &SessionRecord) -> Result<usize, RecordStoreError>;

    /// List every record in insertion order.
    async fn list(&self) -> Result<Vec<SessionRecord>, RecordStoreError>;

    /// Fetch one record by index.
    ///
    /// # Errors
    /// Returns `RecordStoreError::NotFound` for an index past the end
    async fn get(&self, index: usize) -> Result<SessionRecord, RecordStoreError>;

    /// Index of the record produced by `session_id`, if it was appended.
    async fn position_of(&self, session_id: SessionId) -> Result<Option<usize>, RecordStoreError> {
        Ok(self
            .list()
            .await?
            .iter()
            .position(|record| record.session_id == session_id))
    }

    /// Summaries of every record in insertion order.
    async fn summaries(&self) -> Result<Vec<RecordSummary>, RecordStoreError> {
        Ok(self
            .list()
            .await?
            .iter()
            .enumerate()
            .map(|(index, record)| record.summary(index))
            .collect())
    }
}
