//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, potentials, errors)
//! - `catalog` - Static question catalog per block, with integrity checks
//! - `questionnaire` - The generic scorable form and the three block engines
//! - `session` - Session aggregate, stages, the finished record and report input

pub mod catalog;
pub mod foundation;
pub mod questionnaire;
pub mod session;
