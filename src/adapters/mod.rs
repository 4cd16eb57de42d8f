//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Session and record stores (in-memory, file)
//! - `http` - REST API built on axum

pub mod http;
pub mod storage;

pub use storage::{FileSessionStore, InMemoryRecordStore, InMemorySessionStore, JsonFileRecordStore};
