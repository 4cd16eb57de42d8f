//! Invalid-input errors raised by a block engine.
//!
//! All of these are recoverable: the engine state is left untouched and the
//! subject may resubmit.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, QuestionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("question '{0}' is not part of this block")]
    UnknownQuestion(QuestionId),

    #[error("block is finished; '{0}' cannot be submitted")]
    Finished(QuestionId),

    #[error("expected an answer to '{expected}', got '{submitted}'")]
    OutOfOrder {
        expected: QuestionId,
        submitted: QuestionId,
    },

    #[error("question '{0}' was already answered")]
    AlreadyAnswered(QuestionId),

    #[error("option index {index} is out of range for '{question}' ({options} options)")]
    OptionOutOfRange {
        question: QuestionId,
        index: usize,
        options: usize,
    },

    #[error("'{text}' is not an option of '{question}'")]
    UnknownOptionText { question: QuestionId, text: String },

    #[error("option {index} is selected twice for '{question}'")]
    DuplicateOption { question: QuestionId, index: usize },

    #[error("'{question}' accepts at most {max} option(s), got {got}")]
    TooManyOptions {
        question: QuestionId,
        max: usize,
        got: usize,
    },

    #[error("'{0}' does not accept free text")]
    FreeTextNotAllowed(QuestionId),

    #[error("select at least one option or write a few words for '{0}'")]
    EmptySubmission(QuestionId),
}

impl FormError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::UnknownQuestion(_) => ErrorCode::QuestionNotFound,
            FormError::Finished(_) | FormError::OutOfOrder { .. } => ErrorCode::OutOfOrder,
            FormError::AlreadyAnswered(_) => ErrorCode::AlreadyAnswered,
            FormError::OptionOutOfRange { .. } => ErrorCode::OutOfRange,
            FormError::EmptySubmission(_) => ErrorCode::EmptyField,
            FormError::UnknownOptionText { .. }
            | FormError::DuplicateOption { .. }
            | FormError::TooManyOptions { .. }
            | FormError::FreeTextNotAllowed(_) => ErrorCode::ValidationFailed,
        }
    }
}
