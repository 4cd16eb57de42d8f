//! HTTP adapter for the subject-facing questionnaire endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerResponse, FinalizeResponse, ProgressResponse, QuestionResponse, SessionStartedResponse,
    StartSessionRequest, SubmitAnswerRequest,
};
pub use handlers::QuestionnaireHandlers;
pub use routes::questionnaire_routes;
