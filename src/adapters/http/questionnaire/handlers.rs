//! HTTP handlers for questionnaire endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::application::{
    FinalizeSessionCommand, FinalizeSessionHandler, GetCurrentQuestionHandler,
    GetCurrentQuestionQuery, GetProgressHandler, GetProgressQuery, StartSessionCommand,
    StartSessionHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::foundation::SessionId;

use super::dto::{
    AnswerResponse, FinalizeResponse, ProgressResponse, QuestionResponse, SessionStartedResponse,
    StartSessionRequest, SubmitAnswerRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QuestionnaireHandlers {
    start_handler: Arc<StartSessionHandler>,
    submit_handler: Arc<SubmitAnswerHandler>,
    question_handler: Arc<GetCurrentQuestionHandler>,
    progress_handler: Arc<GetProgressHandler>,
    finalize_handler: Arc<FinalizeSessionHandler>,
}

impl QuestionnaireHandlers {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        submit_handler: Arc<SubmitAnswerHandler>,
        question_handler: Arc<GetCurrentQuestionHandler>,
        progress_handler: Arc<GetProgressHandler>,
        finalize_handler: Arc<FinalizeSessionHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            question_handler,
            progress_handler,
            finalize_handler,
        }
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| ApiError::bad_request("Invalid session ID"))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Start a new session
pub async fn start_session(
    State(handlers): State<QuestionnaireHandlers>,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    let cmd = StartSessionCommand {
        subject: req.subject,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: SessionStartedResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /api/sessions/:id/question - The question awaiting an answer
pub async fn get_current_question(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers
        .question_handler
        .handle(GetCurrentQuestionQuery { session_id })
        .await
    {
        Ok(current) => {
            let response = QuestionResponse {
                stage: current.stage,
                finished: current.question.is_none(),
                question: current.question,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/sessions/:id/answers - Submit one answer
pub async fn submit_answer(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let submission = match req.into_submission() {
        Ok(submission) => submission,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let cmd = SubmitAnswerCommand {
        session_id,
        submission,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: AnswerResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /api/sessions/:id/progress - Progress of the active block
pub async fn get_progress(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers
        .progress_handler
        .handle(GetProgressQuery { session_id })
        .await
    {
        Ok(progress) => {
            let response: ProgressResponse = progress.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/sessions/:id/finalize - Produce the session record
pub async fn finalize_session(
    State(handlers): State<QuestionnaireHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers
        .finalize_handler
        .handle(FinalizeSessionCommand { session_id })
        .await
    {
        Ok(result) => {
            let response: FinalizeResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
