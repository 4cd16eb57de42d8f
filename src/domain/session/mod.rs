//! Session domain module.
//!
//! A session carries one subject through the three blocks in order and,
//! once all of them are finished, produces the immutable [`SessionRecord`].
//!
//! # Stages
//!
//! `Childhood` -> `Vocation` -> `Columns` -> `Complete` -> `Finalized`

mod aggregate;
mod errors;
mod record;
mod report;
mod stage;
#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{AnswerAccepted, QuestionnaireSession, SessionProgress};
pub use errors::SessionError;
pub use record::{ChildhoodRecord, ColumnsRecord, RecordSummary, SessionRecord, VocationRecord};
pub use report::{PotentialDescription, Rankings, ReportInput};
pub use stage::SessionStage;
