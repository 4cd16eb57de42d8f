//! GetCurrentQuestionHandler - Query handler for the question awaiting an answer.

use std::sync::Arc;

use crate::domain::catalog::{Catalog, PresentedQuestion};
use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionError, SessionStage};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetCurrentQuestionQuery {
    pub session_id: SessionId,
}

/// The current question, or `None` once every block is finished.
#[derive(Debug, Clone)]
pub struct CurrentQuestion {
    pub stage: SessionStage,
    pub question: Option<PresentedQuestion>,
}

pub struct GetCurrentQuestionHandler {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
}

impl GetCurrentQuestionHandler {
    pub fn new(catalog: Arc<Catalog>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub async fn handle(&self, query: GetCurrentQuestionQuery) -> Result<CurrentQuestion, SessionError> {
        let session = self.sessions.load(query.session_id).await?;
        Ok(CurrentQuestion {
            stage: session.stage(),
            question: session.current_question(&self.catalog),
        })
    }
}
