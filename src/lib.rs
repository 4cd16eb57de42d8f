//! Deep Identity - Potential-discovery questionnaire service
//!
//! Walks a subject through three fixed question blocks (childhood branching,
//! weighted vocation multiselect, perception/process/result columns), scores
//! each answer against nine potentials and files one immutable record per
//! finished session for a reviewer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
