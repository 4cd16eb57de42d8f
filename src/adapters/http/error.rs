//! Error responses shared by every endpoint.
//!
//! Every error body is `{code, message}`; the HTTP status is derived from the
//! error's [`ErrorCode`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::session::SessionError;
use crate::ports::RecordStoreError;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// HTTP status for an error code.
///
/// Invalid input is 400, missing resources 404, requests that conflict with
/// the session stage 409, a missing or wrong reviewer key 401.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::QuestionNotFound
        | ErrorCode::OutOfOrder
        | ErrorCode::AlreadyAnswered => StatusCode::BAD_REQUEST,
        ErrorCode::SessionNotFound | ErrorCode::RecordNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::SessionNotReady
        | ErrorCode::SessionFinalized => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::CatalogIntegrity | ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// An error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: status_for(code),
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.body.code, message = %self.body.message, "Request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let mut api = ApiError::new(err.code(), err.message());
        if let SessionError::WrongBlock { submitted, active, .. } = &err {
            api.body = api.body.with_details(serde_json::json!({
                "submitted_block": submitted,
                "active_block": active,
            }));
        }
        api
    }
}

impl From<RecordStoreError> for ApiError {
    fn from(err: RecordStoreError) -> Self {
        ApiError::new(err.code(), err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::from(&err), err.to_string())
    }
}
