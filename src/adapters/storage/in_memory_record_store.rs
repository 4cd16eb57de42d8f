//! In-Memory Record Store Adapter
//!
//! Append-only vector of finished records. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::session::SessionRecord;
use crate::ports::{RecordStore, RecordStoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Vec<SessionRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn append(&self, record: &SessionRecord) -> Result<usize, RecordStoreError> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(records.len() - 1)
    }

    async fn list(&self) -> Result<Vec<SessionRecord>, RecordStoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, index: usize) -> Result<SessionRecord, RecordStoreError> {
        self.records
            .read()
            .await
            .get(index)
            .cloned()
            .ok_or(RecordStoreError::NotFound(index))
    }
}
