//! Session-specific error types.

use crate::domain::foundation::{Block, ErrorCode, QuestionId, SessionId, ValidationError};
use crate::domain::questionnaire::FormError;

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// No block of the catalog defines this question.
    QuestionNotFound(QuestionId),
    /// The question belongs to a block that is not accepting answers.
    WrongBlock {
        question: QuestionId,
        submitted: Block,
        active: Option<Block>,
    },
    /// Finalize was called while a block is still unfinished.
    NotReady { pending: Block },
    /// The session already produced its record.
    AlreadyFinalized(SessionId),
    /// The active block rejected the submission.
    Form(FormError),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Invalid stage transition.
    InvalidState(String),
    /// Storage error.
    Storage(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn not_ready(pending: Block) -> Self {
        SessionError::NotReady { pending }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }
    pub fn storage(message: impl Into<String>) -> Self {
        SessionError::Storage(message.into())
    }

    /// True for errors the subject can fix by resubmitting.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SessionError::QuestionNotFound(_)
                | SessionError::WrongBlock { .. }
                | SessionError::Form(_)
                | SessionError::ValidationFailed { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
            SessionError::WrongBlock { .. } => ErrorCode::OutOfOrder,
            SessionError::NotReady { .. } => ErrorCode::SessionNotReady,
            SessionError::AlreadyFinalized(_) => ErrorCode::SessionFinalized,
            SessionError::Form(err) => err.code(),
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::QuestionNotFound(id) => format!("Question not found: {}", id),
            SessionError::WrongBlock {
                question,
                submitted,
                active: Some(active),
            } => format!(
                "Question '{}' belongs to the {} block, but the {} block is active",
                question, submitted, active
            ),
            SessionError::WrongBlock {
                question,
                active: None,
                ..
            } => format!("Question '{}' cannot be answered: all blocks are finished", question),
            SessionError::NotReady { pending } => {
                format!("Session is not ready: the {} block is unfinished", pending)
            }
            SessionError::AlreadyFinalized(id) => format!("Session {} is already finalized", id),
            SessionError::Form(err) => err.to_string(),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SessionError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<FormError> for SessionError {
    fn from(err: FormError) -> Self {
        SessionError::Form(err)
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::validation(err.field(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_names_pending_block() {
        let err = SessionError::not_ready(Block::Columns);
        assert_eq!(err.code(), ErrorCode::SessionNotReady);
        assert!(err.to_string().contains("columns"));
    }

    #[test]
    fn form_errors_keep_their_code() {
        let err: SessionError = FormError::AlreadyAnswered(QuestionId::new("q").unwrap()).into();
        assert_eq!(err.code(), ErrorCode::AlreadyAnswered);
        assert!(err.is_invalid_input());
    }

    #[test]
    fn wrong_block_reads_as_out_of_order() {
        let err = SessionError::WrongBlock {
            question: QuestionId::new("c1_q1").unwrap(),
            submitted: Block::Columns,
            active: Some(Block::Childhood),
        };
        assert_eq!(err.code(), ErrorCode::OutOfOrder);
        assert_eq!(
            err.to_string(),
            "Question 'c1_q1' belongs to the columns block, but the childhood block is active"
        );
    }

    #[test]
    fn validation_error_keeps_field_name() {
        let err: SessionError = ValidationError::empty_field("subject").into();
        assert!(matches!(
            err,
            SessionError::ValidationFailed { ref field, .. } if field == "subject"
        ));
    }
}
