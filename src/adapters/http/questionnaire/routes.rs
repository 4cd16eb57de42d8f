//! HTTP routes for questionnaire endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    finalize_session, get_current_question, get_progress, start_session, submit_answer,
    QuestionnaireHandlers,
};

/// Creates the questionnaire router with all endpoints.
pub fn questionnaire_routes(handlers: QuestionnaireHandlers) -> Router {
    Router::new()
        .route("/", post(start_session))
        .route("/:id/question", get(get_current_question))
        .route("/:id/answers", post(submit_answer))
        .route("/:id/progress", get(get_progress))
        .route("/:id/finalize", post(finalize_session))
        .with_state(handlers)
}
