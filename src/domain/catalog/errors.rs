//! Catalog integrity errors.
//!
//! Any of these is a data/programming error: the catalog refuses to load and
//! the service refuses to start.

use thiserror::Error;

use crate::domain::foundation::{Block, ErrorCode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("cannot read catalog file {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed {block} catalog: {message}")]
    Parse { block: Block, message: String },

    #[error("{block} catalog has no questions")]
    EmptyBlock { block: Block },

    #[error("question id '{0}' is defined more than once")]
    DuplicateQuestion(String),

    #[error("question id is blank in {block} catalog")]
    BlankQuestionId { block: Block },

    #[error("question '{0}' has no options")]
    NoOptions(String),

    #[error("question '{question}' lists option text '{text}' twice")]
    DuplicateOptionText { question: String, text: String },

    #[error("backbone references unknown question '{0}'")]
    UnknownBackboneQuestion(String),

    #[error("backbone lists '{0}' twice")]
    DuplicateBackboneEntry(String),

    #[error("question '{question}' schedules unknown follow-up '{follow_up}'")]
    UnknownFollowUp { question: String, follow_up: String },

    #[error("question '{question}' schedules backbone question '{follow_up}' as a follow-up")]
    FollowUpOnBackbone { question: String, follow_up: String },

    #[error("question '{0}' is in a linear block but declares follow-ups")]
    UnexpectedFollowUps(String),

    #[error("question '{question}' is misconfigured: {reason}")]
    InvalidQuestion { question: String, reason: String },

    #[error("question '{question}' carries a non-integer delta {value} for {potential}")]
    NonIntegerDelta {
        question: String,
        potential: String,
        value: f64,
    },
}

impl CatalogError {
    pub fn invalid_question(question: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidQuestion {
            question: question.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::CatalogIntegrity
    }
}
