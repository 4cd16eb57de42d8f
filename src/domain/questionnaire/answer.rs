//! Submissions, stored answers and text log entries.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Group, Question, Section};
use crate::domain::foundation::QuestionId;

/// How the subject picked options: by index or by display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Indices(Vec<usize>),
    Texts(Vec<String>),
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Indices(i) => i.is_empty(),
            Selection::Texts(t) => t.is_empty(),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Indices(Vec::new())
    }
}

/// One answer as submitted by the subject, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub question_id: QuestionId,
    pub selection: Selection,
    pub free_text: Option<String>,
}

impl Submission {
    /// Selects a single option by index.
    pub fn choose(question_id: QuestionId, index: usize) -> Self {
        Self::indices(question_id, vec![index])
    }

    /// Selects options by index, in the order given.
    pub fn indices(question_id: QuestionId, indices: Vec<usize>) -> Self {
        Self {
            question_id,
            selection: Selection::Indices(indices),
            free_text: None,
        }
    }

    /// Selects options by their display text.
    pub fn texts(question_id: QuestionId, texts: Vec<String>) -> Self {
        Self {
            question_id,
            selection: Selection::Texts(texts),
            free_text: None,
        }
    }

    /// Submits only free text, no option.
    pub fn text_only(question_id: QuestionId, text: impl Into<String>) -> Self {
        Self::indices(question_id, Vec::new()).with_free_text(text)
    }

    pub fn with_free_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = Some(text.into());
        self
    }
}

/// Trims free text; whitespace-only text counts as absent.
pub(crate) fn normalize_free_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// A validated, stored answer. Keyed by question id within one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    /// Option indices in selection order.
    pub selected: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

/// Ordered free-text log entry handed to the report drafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLogEntry {
    pub question_id: QuestionId,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

impl TextLogEntry {
    /// Renders the entry as a plain-text block.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("[{}] {}", self.question_id, self.prompt)];
        for text in &self.selected {
            lines.push(format!("- Selected: {}", text));
        }
        if let Some(free_text) = &self.free_text {
            lines.push(format!("Text: {}", free_text));
        }
        lines.join("\n")
    }
}

/// Catalog-independent copy of an answer, as kept in a session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub question_id: QuestionId,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    pub selected: Vec<usize>,
    pub selected_texts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

impl RecordedAnswer {
    pub fn from_answer<E>(question: &Question<E>, answer: &Answer) -> Self {
        Self {
            question_id: answer.question_id.clone(),
            prompt: question.prompt.clone(),
            section: question.section,
            group: question.group,
            selected: answer.selected.clone(),
            selected_texts: question.option_texts(&answer.selected),
            free_text: answer.free_text.clone(),
        }
    }
}
