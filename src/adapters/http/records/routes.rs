//! HTTP routes for reviewer record endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_record, list_records, RecordHandlers};

/// Creates the record router. Callers put the reviewer gate in front of it.
pub fn record_routes(handlers: RecordHandlers) -> Router {
    Router::new()
        .route("/", get(list_records))
        .route("/:index", get(get_record))
        .with_state(handlers)
}
