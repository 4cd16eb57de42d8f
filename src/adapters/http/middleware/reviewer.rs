//! Reviewer gate for the record endpoints.
//!
//! Requests must carry the configured key in the `X-Reviewer-Key` header.
//! The comparison runs in constant time.
//!
//! ```text
//! Request → require_reviewer → key matches? → handler
//!                                   ↓ no
//!                             401 Unauthorized
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::ErrorCode;

/// Header carrying the reviewer key.
pub const REVIEWER_KEY_HEADER: &str = "x-reviewer-key";

/// The expected reviewer key, shared by all requests.
#[derive(Clone)]
pub struct ReviewerKey(Arc<SecretString>);

impl ReviewerKey {
    pub fn new(key: SecretString) -> Self {
        Self(Arc::new(key))
    }

    /// Constant-time check of a provided key.
    pub fn matches(&self, provided: &str) -> bool {
        let expected = self.0.expose_secret().as_bytes();
        let provided = provided.as_bytes();
        if expected.len() != provided.len() {
            return false;
        }
        expected.ct_eq(provided).into()
    }
}

impl std::fmt::Debug for ReviewerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReviewerKey([REDACTED])")
    }
}

/// Rejects requests without the right reviewer key.
pub async fn require_reviewer(
    State(key): State<ReviewerKey>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(REVIEWER_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(provided) if key.matches(provided) => next.run(request).await,
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Wrong reviewer key");
            ApiError::new(ErrorCode::Unauthorized, "Invalid reviewer key").into_response()
        }
        None => ApiError::new(ErrorCode::Unauthorized, "Reviewer key required").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ReviewerKey {
        ReviewerKey::new(SecretString::new("reviewer-key-0123".to_string()))
    }

    #[test]
    fn matches_exact_key_only() {
        let key = key();
        assert!(key.matches("reviewer-key-0123"));
        assert!(!key.matches("reviewer-key-0124"));
        assert!(!key.matches("reviewer-key"));
        assert!(!key.matches(""));
    }

    #[test]
    fn debug_hides_key() {
        assert!(!format!("{:?}", key()).contains("0123"));
    }
}
