//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the trait registry and error types
//! that form the vocabulary of the questionnaire domain.

mod block;
mod errors;
mod ids;
mod potential;
mod progress;
mod state_machine;
mod timestamp;

pub use block::Block;
pub use errors::{ErrorCode, ValidationError};
pub use ids::{QuestionId, SessionId, SubjectName, MAX_SUBJECT_LENGTH};
pub use potential::Potential;
pub use progress::Progress;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
