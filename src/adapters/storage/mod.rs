//! Storage Adapters
//!
//! Implementations of the `SessionStore` and `RecordStore` ports.
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - One YAML file per in-progress session
//! - **InMemorySessionStore** - Sessions in memory (testing/development)
//! - **JsonFileRecordStore** - Finished records in one JSON array file
//! - **InMemoryRecordStore** - Finished records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, JsonFileRecordStore};
//!
//! let sessions = FileSessionStore::new("./data/sessions");
//! let records = JsonFileRecordStore::new("./data/deep_identity_results.json");
//! ```

mod file_session_store;
mod in_memory_record_store;
mod in_memory_session_store;
mod json_file_record_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_record_store::InMemoryRecordStore;
pub use in_memory_session_store::InMemorySessionStore;
pub use json_file_record_store::JsonFileRecordStore;
