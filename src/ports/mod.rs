//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - In-progress sessions keyed by session id
//! - `RecordStore` - Append-only finished session records

mod record_store;
mod session_store;

pub use record_store::{RecordStore, RecordStoreError};
pub use session_store::{SessionStore, SessionStoreError};
