//! StartSessionHandler - Command handler for starting a questionnaire.

use std::sync::Arc;

use crate::domain::catalog::{Catalog, PresentedQuestion};
use crate::domain::foundation::SessionId;
use crate::domain::session::{QuestionnaireSession, SessionError, SessionProgress};
use crate::ports::SessionStore;

/// Command to start a new session.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub subject: String,
}

/// Result of a successful start.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub question: Option<PresentedQuestion>,
    pub progress: SessionProgress,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(catalog: Arc<Catalog>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<StartSessionResult, SessionError> {
        let session = QuestionnaireSession::start(&cmd.subject, &self.catalog)?;
        self.sessions.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            stage = %session.stage(),
            "Questionnaire session started"
        );

        Ok(StartSessionResult {
            session_id: session.id(),
            question: session.current_question(&self.catalog),
            progress: session.progress(&self.catalog),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::{Block, Progress};

    fn handler(store: InMemorySessionStore) -> StartSessionHandler {
        StartSessionHandler::new(Catalog::builtin().unwrap(), Arc::new(store))
    }

    #[tokio::test]
    async fn starts_and_persists_session() {
        let store = InMemorySessionStore::new();
        let result = handler(store.clone())
            .handle(StartSessionCommand {
                subject: "Anna".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(store.load(result.session_id).await.unwrap().subject().as_str(), "Anna");
        let question = result.question.unwrap();
        assert_eq!(question.block, Block::Childhood);
        assert_eq!(result.progress.progress, Progress::ZERO);
    }

    #[tokio::test]
    async fn rejects_empty_subject_without_saving() {
        let store = InMemorySessionStore::new();
        let err = handler(store.clone())
            .handle(StartSessionCommand {
                subject: "  ".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::ValidationFailed { .. }));
        assert!(store.is_empty().await);
    }
}
