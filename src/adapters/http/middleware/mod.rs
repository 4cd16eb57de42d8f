//! HTTP middleware for axum.
//!
//! - `reviewer` - Reviewer key gate for the record endpoints

pub mod reviewer;

pub use reviewer::{require_reviewer, ReviewerKey, REVIEWER_KEY_HEADER};
