//! SubmitAnswerHandler - Command handler for one answer submission.

use std::sync::Arc;

use crate::domain::catalog::{Catalog, PresentedQuestion};
use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::Submission;
use crate::domain::session::{AnswerAccepted, SessionError, SessionProgress};
use crate::ports::SessionStore;

/// Command to submit an answer to a session.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub submission: Submission,
}

/// Result of an accepted answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub accepted: AnswerAccepted,
    /// The question to present next, `None` once every block is finished.
    pub next_question: Option<PresentedQuestion>,
    pub progress: SessionProgress,
}

/// Handler for answer submissions.
pub struct SubmitAnswerHandler {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
}

impl SubmitAnswerHandler {
    pub fn new(catalog: Arc<Catalog>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<SubmitAnswerResult, SessionError> {
        let mut session = self.sessions.load(cmd.session_id).await?;

        let accepted = match session.submit(&self.catalog, &cmd.submission) {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::debug!(
                    session_id = %cmd.session_id,
                    question_id = %cmd.submission.question_id,
                    stage = %session.stage(),
                    error = %err,
                    "Answer rejected"
                );
                return Err(err);
            }
        };

        self.sessions.save(&session).await?;

        if accepted.block_finished {
            tracing::info!(
                session_id = %cmd.session_id,
                block = %accepted.block,
                stage = %accepted.stage,
                "Block finished"
            );
        }

        Ok(SubmitAnswerResult {
            next_question: session.current_question(&self.catalog),
            progress: session.progress(&self.catalog),
            accepted,
        })
    }
}
