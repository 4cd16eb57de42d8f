//! Error vocabulary shared by every layer.

use std::fmt;
use thiserror::Error;

/// A value object refused its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{field}' must not be blank")]
    EmptyField { field: String },

    #[error("'{field}' is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

/// Stable machine-readable error classes exposed in API bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    SessionNotFound,
    QuestionNotFound,
    RecordNotFound,

    InvalidStateTransition,
    OutOfOrder,
    AlreadyAnswered,
    SessionNotReady,
    SessionFinalized,

    Unauthorized,

    CatalogIntegrity,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::QuestionNotFound => "QUESTION_NOT_FOUND",
            ErrorCode::RecordNotFound => "RECORD_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::OutOfOrder => "OUT_OF_ORDER",
            ErrorCode::AlreadyAnswered => "ALREADY_ANSWERED",
            ErrorCode::SessionNotReady => "SESSION_NOT_READY",
            ErrorCode::SessionFinalized => "SESSION_FINALIZED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::CatalogIntegrity => "CATALOG_INTEGRITY",
            ErrorCode::StorageError => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ValidationError> for ErrorCode {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_field_message_names_the_field() {
        let err = ValidationError::empty_field("subject");
        assert_eq!(err.to_string(), "'subject' must not be blank");
        assert_eq!(err.field(), "subject");
        assert_eq!(ErrorCode::from(&err), ErrorCode::EmptyField);
    }

    #[test]
    fn malformed_field_carries_reason() {
        let err = ValidationError::invalid_format("session_id", "not a uuid");
        assert_eq!(err.to_string(), "'session_id' is malformed: not a uuid");
        assert_eq!(ErrorCode::from(&err), ErrorCode::InvalidFormat);
    }

    #[test]
    fn codes_render_in_screaming_snake_case() {
        assert_eq!(ErrorCode::SessionNotReady.to_string(), "SESSION_NOT_READY");
        assert_eq!(ErrorCode::OutOfOrder.as_str(), "OUT_OF_ORDER");
    }
}
