//! HTTP DTOs for questionnaire endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{FinalizeSessionResult, StartSessionResult, SubmitAnswerResult};
use crate::domain::catalog::PresentedQuestion;
use crate::domain::foundation::{Block, QuestionId, ValidationError};
use crate::domain::questionnaire::{Admission, Submission};
use crate::domain::session::{SessionProgress, SessionRecord, SessionStage};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub subject: String,
}

/// Request to submit one answer.
///
/// Options are picked either by index (`selected`) or by display text
/// (`selected_texts`), never both in one request.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    #[serde(default)]
    pub selected: Vec<usize>,
    #[serde(default)]
    pub selected_texts: Option<Vec<String>>,
    #[serde(default)]
    pub free_text: Option<String>,
}

impl SubmitAnswerRequest {
    pub fn into_submission(self) -> Result<Submission, ValidationError> {
        let question_id = QuestionId::new(self.question_id)?;
        if !self.selected.is_empty() && self.selected_texts.is_some() {
            return Err(ValidationError::invalid_format(
                "selected",
                "send either option indices or option texts, not both",
            ));
        }
        let submission = match self.selected_texts {
            Some(texts) => Submission::texts(question_id, texts),
            None => Submission::indices(question_id, self.selected),
        };
        Ok(match self.free_text {
            Some(text) => submission.with_free_text(text),
            None => submission,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub stage: SessionStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Block>,
    pub progress: f64,
    pub percent: u8,
}

impl From<SessionProgress> for ProgressResponse {
    fn from(p: SessionProgress) -> Self {
        Self {
            stage: p.stage,
            block: p.block,
            progress: p.progress.value(),
            percent: p.progress.as_percent(),
        }
    }
}

/// Response for a newly started session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStartedResponse {
    pub session_id: String,
    pub question: Option<PresentedQuestion>,
    pub progress: ProgressResponse,
}

impl From<StartSessionResult> for SessionStartedResponse {
    fn from(r: StartSessionResult) -> Self {
        Self {
            session_id: r.session_id.to_string(),
            question: r.question,
            progress: r.progress.into(),
        }
    }
}

/// The question awaiting an answer.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub stage: SessionStage,
    /// True once every block is finished and nothing is left to answer.
    pub finished: bool,
    pub question: Option<PresentedQuestion>,
}

/// Response for an accepted answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub question_id: String,
    pub block: Block,
    /// `fresh` or `revision`.
    pub admission: &'static str,
    pub block_finished: bool,
    pub stage: SessionStage,
    pub next_question: Option<PresentedQuestion>,
    pub progress: ProgressResponse,
}

impl From<SubmitAnswerResult> for AnswerResponse {
    fn from(r: SubmitAnswerResult) -> Self {
        Self {
            question_id: r.accepted.question_id.to_string(),
            block: r.accepted.block,
            admission: match r.accepted.admission {
                Admission::Fresh => "fresh",
                Admission::Revision => "revision",
            },
            block_finished: r.accepted.block_finished,
            stage: r.accepted.stage,
            next_question: r.next_question,
            progress: r.progress.into(),
        }
    }
}

/// Response for a finalized session.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizeResponse {
    /// Position of the record in the results store.
    pub index: usize,
    pub record: SessionRecord,
}

impl From<FinalizeSessionResult> for FinalizeResponse {
    fn from(r: FinalizeSessionResult) -> Self {
        Self {
            index: r.index,
            record: r.record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::Selection;

    fn request(json: serde_json::Value) -> SubmitAnswerRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn indices_default_to_empty() {
        let sub = request(serde_json::json!({"question_id": "work_extra", "free_text": "gardens"}))
            .into_submission()
            .unwrap();
        assert_eq!(sub.selection, Selection::Indices(vec![]));
        assert_eq!(sub.free_text.as_deref(), Some("gardens"));
    }

    #[test]
    fn selects_by_text_when_no_indices_given() {
        let sub = request(serde_json::json!({
            "question_id": "c1_q1",
            "selected_texts": ["A beautiful voice"]
        }))
        .into_submission()
        .unwrap();
        assert_eq!(
            sub.selection,
            Selection::Texts(vec!["A beautiful voice".to_string()])
        );
    }

    #[test]
    fn indices_and_texts_together_are_rejected() {
        let err = request(serde_json::json!({
            "question_id": "c1_q1",
            "selected": [0],
            "selected_texts": ["A beautiful voice"]
        }))
        .into_submission()
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat { ref field, .. } if field == "selected"
        ));
    }

    #[test]
    fn blank_question_id_is_rejected() {
        let err = request(serde_json::json!({"question_id": "  "}))
            .into_submission()
            .unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }
}
