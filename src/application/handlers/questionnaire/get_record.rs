//! GetRecordHandler - Reviewer query for one record and its report input.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::session::{ReportInput, SessionRecord};
use crate::ports::{RecordStore, RecordStoreError};

#[derive(Debug, Clone)]
pub struct GetRecordQuery {
    pub index: usize,
}

/// A stored record together with the input for drafting its report.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub index: usize,
    pub record: SessionRecord,
    pub report: ReportInput,
}

pub struct GetRecordHandler {
    records: Arc<dyn RecordStore>,
}

impl GetRecordHandler {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    pub async fn handle(&self, query: GetRecordQuery) -> Result<RecordView, RecordStoreError> {
        let record = self.records.get(query.index).await?;
        Ok(RecordView {
            index: query.index,
            report: ReportInput::from_record(&record),
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryRecordStore;
    use crate::domain::session::testing::finished_record;

    #[tokio::test]
    async fn returns_record_with_report_input() {
        let store = InMemoryRecordStore::new();
        store.append(&finished_record("Anna")).await.unwrap();
        let handler = GetRecordHandler::new(Arc::new(store));

        let view = handler.handle(GetRecordQuery { index: 0 }).await.unwrap();

        assert_eq!(view.report.subject.as_str(), "Anna");
        assert_eq!(view.report.potentials.len(), 9);
    }

    #[tokio::test]
    async fn missing_index_is_not_found() {
        let handler = GetRecordHandler::new(Arc::new(InMemoryRecordStore::new()));
        let err = handler.handle(GetRecordQuery { index: 4 }).await.unwrap_err();
        assert!(matches!(err, RecordStoreError::NotFound(4)));
    }
}
