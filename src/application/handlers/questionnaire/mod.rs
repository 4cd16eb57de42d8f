//! Questionnaire command and query handlers.

mod finalize_session;
mod get_current_question;
mod get_progress;
mod get_record;
mod list_records;
mod start_session;
mod submit_answer;

pub use finalize_session::{FinalizeSessionCommand, FinalizeSessionHandler, FinalizeSessionResult};
pub use get_current_question::{CurrentQuestion, GetCurrentQuestionHandler, GetCurrentQuestionQuery};
pub use get_progress::{GetProgressHandler, GetProgressQuery};
pub use get_record::{GetRecordHandler, GetRecordQuery, RecordView};
pub use list_records::{ListRecordsHandler, ListRecordsQuery};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
