//! The finalized, self-contained snapshot of one session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, SubjectName, Timestamp};
use crate::domain::questionnaire::{ColumnSheet, RecordedAnswer, ScoreSheet, TextLogEntry};

/// Block 1 outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildhoodRecord {
    pub scores: ScoreSheet<i32>,
    pub answers: Vec<RecordedAnswer>,
}

/// Block 2 outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocationRecord {
    pub scores: ScoreSheet<f64>,
    pub answers: Vec<RecordedAnswer>,
    pub text_log: Vec<TextLogEntry>,
}

/// Block 3 outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsRecord {
    pub scores: ColumnSheet,
    pub answers: Vec<RecordedAnswer>,
    pub text_log: Vec<TextLogEntry>,
}

/// Durable result of a finished session.
///
/// Everything is copied out of the engines, so the record can be read
/// without the catalog and is never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub subject: SubjectName,
    pub started_at: Timestamp,
    pub finalized_at: Timestamp,
    pub childhood: ChildhoodRecord,
    pub vocation: VocationRecord,
    pub columns: ColumnsRecord,
}

/// Reviewer listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Position in the store, in insertion order.
    pub index: usize,
    pub session_id: SessionId,
    pub subject: SubjectName,
    pub finalized_at: Timestamp,
}

impl SessionRecord {
    pub fn summary(&self, index: usize) -> RecordSummary {
        RecordSummary {
            index,
            session_id: self.session_id,
            subject: self.subject.clone(),
            finalized_at: self.finalized_at,
        }
    }
}
