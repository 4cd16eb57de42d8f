//! ListRecordsHandler - Reviewer query listing finished sessions.

use std::sync::Arc;

use crate::domain::session::RecordSummary;
use crate::ports::{RecordStore, RecordStoreError};

#[derive(Debug, Clone, Default)]
pub struct ListRecordsQuery;

pub struct ListRecordsHandler {
    records: Arc<dyn RecordStore>,
}

impl ListRecordsHandler {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// Summaries in insertion order, oldest first.
    pub async fn handle(&self, _query: ListRecordsQuery) -> Result<Vec<RecordSummary>, RecordStoreError> {
        self.records.summaries().await
    }
}
