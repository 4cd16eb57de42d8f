//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a map behind an async lock.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::session::QuestionnaireSession;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for questionnaire sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, QuestionnaireSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &QuestionnaireSession) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<QuestionnaireSession, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::foundation::QuestionId;
    use crate::domain::questionnaire::Submission;

    fn session() -> QuestionnaireSession {
        let catalog = Catalog::builtin().unwrap();
        QuestionnaireSession::start("Anna", &catalog).unwrap()
    }

    #[tokio::test]
    async fn save_then_load_returns_same_session() {
        let store = InMemorySessionStore::new();
        let session = session();

        store.save(&session).await.unwrap();

        assert_eq!(store.load(session.id()).await.unwrap(), session);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn load_missing_is_not_found() {
        let store = InMemorySessionStore::new();
        let result = store.load(SessionId::new()).await;
        assert!(matches!(result, Err(SessionStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn sessions_are_isolated_by_id() {
        let store = InMemorySessionStore::new();
        let first = session();
        let second = session();
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let catalog = Catalog::builtin().unwrap();
        let mut advanced = first.clone();
        advanced
            .submit(
                &catalog,
                &Submission::choose(QuestionId::new("b1_q1_free_play").unwrap(), 0),
            )
            .unwrap();
        store.save(&advanced).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.load(first.id()).await.unwrap(), advanced);
        assert_eq!(store.load(second.id()).await.unwrap(), second);
    }
}
