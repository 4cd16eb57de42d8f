//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change a session; query handlers only read sessions or
//! finished records.

pub mod handlers;

pub use handlers::{
    // Session commands
    FinalizeSessionCommand, FinalizeSessionHandler, FinalizeSessionResult,
    StartSessionCommand, StartSessionHandler, StartSessionResult,
    SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult,
    // Session queries
    CurrentQuestion, GetCurrentQuestionHandler, GetCurrentQuestionQuery,
    GetProgressHandler, GetProgressQuery,
    // Reviewer queries
    GetRecordHandler, GetRecordQuery, ListRecordsHandler, ListRecordsQuery, RecordView,
};
