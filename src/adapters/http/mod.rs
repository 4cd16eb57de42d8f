//! HTTP adapters - REST API implementations.
//!
//! - `POST /api/sessions` and `/api/sessions/:id/...` - subject-facing questionnaire
//! - `GET /api/records` and `/api/records/:index` - reviewer access, gated by key
//! - `GET /health` - liveness

pub mod error;
pub mod middleware;
pub mod questionnaire;
pub mod records;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::{
    FinalizeSessionHandler, GetCurrentQuestionHandler, GetProgressHandler, GetRecordHandler,
    ListRecordsHandler, StartSessionHandler, SubmitAnswerHandler,
};
use crate::config::ServerConfig;
use crate::domain::catalog::Catalog;
use crate::ports::{RecordStore, SessionStore};

pub use error::{ApiError, ErrorResponse};
pub use middleware::{require_reviewer, ReviewerKey, REVIEWER_KEY_HEADER};
pub use questionnaire::{questionnaire_routes, QuestionnaireHandlers};
pub use records::{record_routes, RecordHandlers};

/// Assembles the API: questionnaire and gated record routes under `/api`.
pub fn api_router(
    questionnaire: QuestionnaireHandlers,
    records: RecordHandlers,
    reviewer_key: ReviewerKey,
) -> Router {
    let records =
        record_routes(records).route_layer(from_fn_with_state(reviewer_key, require_reviewer));

    let api = Router::new()
        .nest("/sessions", questionnaire_routes(questionnaire))
        .nest("/records", records);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

/// Wires every application handler over the given catalog and stores.
pub fn app(
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
    records: Arc<dyn RecordStore>,
    reviewer_key: ReviewerKey,
) -> Router {
    let questionnaire = QuestionnaireHandlers::new(
        Arc::new(StartSessionHandler::new(catalog.clone(), sessions.clone())),
        Arc::new(SubmitAnswerHandler::new(catalog.clone(), sessions.clone())),
        Arc::new(GetCurrentQuestionHandler::new(catalog.clone(), sessions.clone())),
        Arc::new(GetProgressHandler::new(catalog.clone(), sessions.clone())),
        Arc::new(FinalizeSessionHandler::new(catalog, sessions, records.clone())),
    );
    let record_handlers = RecordHandlers::new(
        Arc::new(ListRecordsHandler::new(records.clone())),
        Arc::new(GetRecordHandler::new(records)),
    );
    api_router(questionnaire, record_handlers, reviewer_key)
}

/// Adds the layers driven by server configuration: CORS and request timeout.
pub fn with_server_layers(router: Router, config: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
    .allow_methods(Any)
    .allow_headers(Any);

    router.layer(
        ServiceBuilder::new()
            .layer(cors)
            .layer(TimeoutLayer::new(config.request_timeout())),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn config(origins: Option<&str>) -> ServerConfig {
        ServerConfig {
            cors_origins: origins.map(str::to_string),
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let router = Router::new().route("/health", get(health));
        let router = with_server_layers(router, &config(Some("http://localhost:3000, bad\norigin")));

        let response = router
            .oneshot(
                Request::get("/health")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn any_origin_without_configuration() {
        let router = with_server_layers(Router::new().route("/health", get(health)), &config(None));

        let response = router
            .oneshot(
                Request::get("/health")
                    .header("origin", "http://example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
