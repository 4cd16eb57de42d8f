//! Session store port - in-progress session state keyed by session id.
//!
//! Each session is saved whole after every accepted operation. Sessions
//! are fully isolated: implementations never share mutable state between
//! two session ids. Sessions are never removed; a finalized session stays
//! behind in its `Finalized` stage.

use async_trait::async_trait;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::session::{QuestionnaireSession, SessionError};

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl SessionStoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionStoreError::NotFound(_) => ErrorCode::SessionNotFound,
            _ => ErrorCode::StorageError,
        }
    }
}

impl From<SessionStoreError> for SessionError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => SessionError::not_found(id),
            other => SessionError::storage(other.to_string()),
        }
    }
}

/// Port for persisting and loading questionnaire sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Save a session, replacing any previous state under its id.
    ///
    /// # Errors
    /// Returns `SessionStoreError` if save fails
    async fn save(&self, session: &QuestionnaireSession) -> Result<(), SessionStoreError>;

    /// Load a session.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn load(&self, id: SessionId) -> Result<QuestionnaireSession, SessionStoreError>;
}
