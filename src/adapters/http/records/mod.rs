//! HTTP adapter for reviewer access to finished records.

mod handlers;
mod routes;

pub use handlers::{RecordHandlers, RecordListResponse};
pub use routes::record_routes;
