//! FinalizeSessionHandler - Command handler producing the session record.
//!
//! Finalizations are serialized through one lock, and a record already
//! present for the session is never appended again, so each session yields
//! at most one stored record even when a client retries.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::catalog::Catalog;
use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionError, SessionRecord};
use crate::ports::{RecordStore, SessionStore};

#[derive(Debug, Clone)]
pub struct FinalizeSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct FinalizeSessionResult {
    /// Position of the record in the record store.
    pub index: usize,
    pub record: SessionRecord,
}

pub struct FinalizeSessionHandler {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
    records: Arc<dyn RecordStore>,
    lock: Mutex<()>,
}

impl FinalizeSessionHandler {
    pub fn new(
        catalog: Arc<Catalog>,
        sessions: Arc<dyn SessionStore>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            records,
            lock: Mutex::new(()),
        }
    }

    pub async fn handle(
        &self,
        cmd: FinalizeSessionCommand,
    ) -> Result<FinalizeSessionResult, SessionError> {
        let _guard = self.lock.lock().await;

        let mut session = self.sessions.load(cmd.session_id).await?;
        let fresh = session.finalize(&self.catalog)?;

        // A stored record from an earlier attempt is the one reviewers see.
        let (index, record) = match self.records.position_of(fresh.session_id).await? {
            Some(index) => (index, self.records.get(index).await?),
            None => {
                let index = self.records.append(&fresh).await.map_err(|e| {
                    tracing::error!(session_id = %cmd.session_id, error = %e, "Failed to append record");
                    SessionError::from(e)
                })?;
                (index, fresh)
            }
        };

        self.sessions.save(&session).await.map_err(|e| {
            tracing::error!(session_id = %cmd.session_id, error = %e, "Failed to save finalized session");
            SessionError::from(e)
        })?;

        tracing::info!(
            session_id = %cmd.session_id,
            index,
            subject = %record.subject,
            finalized_at = %record.finalized_at,
            "Session record appended"
        );

        Ok(FinalizeSessionResult { index, record })
    }
}
