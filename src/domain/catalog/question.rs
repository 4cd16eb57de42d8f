//! Question and option definitions shared by all three blocks.
//!
//! A question is generic over the *effect* its options carry: a delta map
//! for Blocks 1 and 2, a flat list of potentials for Block 3.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{Block, Potential, QuestionId};

/// Per-potential score deltas carried by a Block 1 or Block 2 option.
pub type Deltas<N> = BTreeMap<Potential, N>;

/// Whether a question accepts one option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

impl SelectionMode {
    /// Maximum number of options one submission may select.
    pub fn max_selections(&self, option_count: usize) -> usize {
        match self {
            SelectionMode::Single => 1.min(option_count),
            SelectionMode::Multiple => option_count,
        }
    }
}

/// Presentation heading of a Block 2 question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Shifts,
    Work,
    Process,
}

impl Section {
    /// Returns the heading shown above questions of this section.
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Shifts => "Part 0. State and shifts",
            Section::Work => "Part 1. Profession and role picture",
            Section::Process => "Part 2. Processes where you feel alive or drained",
        }
    }
}

/// Semantic column of a Block 3 question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Column 1: what impresses ("wow").
    Perception,
    /// Column 2: what absorbs (interest, attraction).
    Process,
    /// Column 3: what feels like a win.
    Result,
}

impl Group {
    /// All groups in column order.
    pub const ALL: [Group; 3] = [Group::Perception, Group::Process, Group::Result];

    /// Returns the column heading.
    pub fn heading(&self) -> &'static str {
        match self {
            Group::Perception => "Column 1 - Perception (wow, impression)",
            Group::Process => "Column 2 - Process (interest, attraction)",
            Group::Result => "Column 3 - Result (victory, triumph)",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Group::Perception => "perception",
            Group::Process => "process",
            Group::Result => "result",
        };
        write!(f, "{}", s)
    }
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOption<E> {
    /// Stable machine key (Block 3 only).
    pub key: Option<String>,
    pub text: String,
    pub effect: E,
    /// Block 1 questions scheduled when this option is chosen.
    pub follow_ups: Vec<QuestionId>,
}

impl<E> AnswerOption<E> {
    pub fn new(text: impl Into<String>, effect: E) -> Self {
        Self {
            key: None,
            text: text.into(),
            effect,
            follow_ups: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_follow_ups(mut self, follow_ups: Vec<QuestionId>) -> Self {
        self.follow_ups = follow_ups;
        self
    }
}

/// Immutable catalog question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question<E> {
    pub id: QuestionId,
    pub block: Block,
    pub prompt: String,
    /// Short heading (Block 3 only).
    pub title: Option<String>,
    pub section: Option<Section>,
    pub group: Option<Group>,
    pub selection: SelectionMode,
    pub allows_free_text: bool,
    pub options: Vec<AnswerOption<E>>,
}

impl<E> Question<E> {
    /// Creates a single-select question without free text.
    pub fn new(id: QuestionId, block: Block, prompt: impl Into<String>) -> Self {
        Self {
            id,
            block,
            prompt: prompt.into(),
            title: None,
            section: None,
            group: None,
            selection: SelectionMode::Single,
            allows_free_text: false,
            options: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_free_text(mut self, allowed: bool) -> Self {
        self.allows_free_text = allowed;
        self
    }

    pub fn with_option(mut self, option: AnswerOption<E>) -> Self {
        self.options.push(option);
        self
    }

    /// Returns the option at `index`, if any.
    pub fn option(&self, index: usize) -> Option<&AnswerOption<E>> {
        self.options.get(index)
    }

    /// Finds the index of the option whose display text equals `text`.
    ///
    /// Surrounding whitespace is ignored on the caller's side.
    pub fn option_index_by_text(&self, text: &str) -> Option<usize> {
        let text = text.trim();
        self.options.iter().position(|o| o.text == text)
    }

    /// Display texts of the given option indices, skipping unknown ones.
    pub fn option_texts(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&i| self.options.get(i))
            .map(|o| o.text.clone())
            .collect()
    }

    /// Whether several options may be chosen at once.
    pub fn is_multi_select(&self) -> bool {
        self.selection == SelectionMode::Multiple
    }

    /// Effect-free view for presenting the question to a subject.
    pub fn present(&self) -> PresentedQuestion {
        PresentedQuestion {
            id: self.id.clone(),
            block: self.block,
            prompt: self.prompt.clone(),
            title: self.title.clone(),
            section: self.section,
            group: self.group,
            selection: self.selection,
            allows_free_text: self.allows_free_text,
            options: self
                .options
                .iter()
                .enumerate()
                .map(|(index, o)| PresentedOption {
                    index,
                    key: o.key.clone(),
                    text: o.text.clone(),
                })
                .collect(),
        }
    }
}

/// A question as shown to the subject: no score effects, no follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedQuestion {
    pub id: QuestionId,
    pub block: Block,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    pub selection: SelectionMode,
    pub allows_free_text: bool,
    pub options: Vec<PresentedOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedOption {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn sample() -> Question<Vec<Potential>> {
        Question::new(qid("c1_q1"), Block::Columns, "What impresses you?")
            .with_group(Group::Perception)
            .with_selection(SelectionMode::Multiple)
            .with_free_text(true)
            .with_option(
                AnswerOption::new("A beautiful voice", vec![Potential::Heliodor]).with_key("voice"),
            )
            .with_option(AnswerOption::new("Something else", vec![]).with_key("other"))
    }

    #[test]
    fn option_index_by_text_matches_exact_display_text() {
        let q = sample();
        assert_eq!(q.option_index_by_text("Something else"), Some(1));
        assert_eq!(q.option_index_by_text("  A beautiful voice "), Some(0));
        assert_eq!(q.option_index_by_text("a beautiful voice"), None);
    }

    #[test]
    fn option_texts_follow_given_order() {
        let q = sample();
        assert_eq!(
            q.option_texts(&[1, 0]),
            vec!["Something else".to_string(), "A beautiful voice".to_string()]
        );
    }

    #[test]
    fn single_select_allows_one_option() {
        assert_eq!(SelectionMode::Single.max_selections(5), 1);
        assert_eq!(SelectionMode::Multiple.max_selections(5), 5);
    }

    #[test]
    fn presented_question_hides_effects_and_numbers_options() {
        let view = sample().present();
        assert_eq!(view.options.len(), 2);
        assert_eq!(view.options[1].index, 1);
        assert_eq!(view.options[1].key.as_deref(), Some("other"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["group"], "perception");
        assert!(json.get("section").is_none());
    }
}
