//! HTTP handlers for reviewer record endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::adapters::http::error::ApiError;
use crate::application::{GetRecordHandler, GetRecordQuery, ListRecordsHandler, ListRecordsQuery};
use crate::domain::session::RecordSummary;

#[derive(Clone)]
pub struct RecordHandlers {
    list_handler: Arc<ListRecordsHandler>,
    get_handler: Arc<GetRecordHandler>,
}

impl RecordHandlers {
    pub fn new(list_handler: Arc<ListRecordsHandler>, get_handler: Arc<GetRecordHandler>) -> Self {
        Self {
            list_handler,
            get_handler,
        }
    }
}

/// Response for the record listing.
#[derive(Debug, Clone, Serialize)]
pub struct RecordListResponse {
    pub records: Vec<RecordSummary>,
    pub total: usize,
}

/// GET /api/records - List finished sessions
pub async fn list_records(State(handlers): State<RecordHandlers>) -> Response {
    match handlers.list_handler.handle(ListRecordsQuery).await {
        Ok(records) => {
            let response = RecordListResponse {
                total: records.len(),
                records,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /api/records/:index - One record with its report input
pub async fn get_record(
    State(handlers): State<RecordHandlers>,
    Path(index): Path<String>,
) -> Response {
    let index = match index.parse::<usize>() {
        Ok(index) => index,
        Err(_) => return ApiError::bad_request("Invalid record index").into_response(),
    };

    match handlers.get_handler.handle(GetRecordQuery { index }).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
