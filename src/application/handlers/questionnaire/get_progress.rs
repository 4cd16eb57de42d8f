//! GetProgressHandler - Query handler for session progress.

use std::sync::Arc;

use crate::domain::catalog::Catalog;
use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionError, SessionProgress};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetProgressQuery {
    pub session_id: SessionId,
}

pub struct GetProgressHandler {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
}

impl GetProgressHandler {
    pub fn new(catalog: Arc<Catalog>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub async fn handle(&self, query: GetProgressQuery) -> Result<SessionProgress, SessionError> {
        let session = self.sessions.load(query.session_id).await?;
        Ok(session.progress(&self.catalog))
    }
}
