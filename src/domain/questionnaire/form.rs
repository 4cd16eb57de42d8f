//! Generic scorable form: one block's answers, scores and text log.
//!
//! A form is parameterized by a [`BlockKind`], which picks the traversal
//! strategy, the scoring strategy and the text-log policy. The form itself is
//! plain data; the catalog is passed in on every call so the form can be
//! stored and reloaded freely.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::answer::{normalize_free_text, Answer, RecordedAnswer, Selection, Submission, TextLogEntry};
use super::errors::FormError;
use super::scoring::{Direction, ScoringRule};
use super::traversal::{Admission, Traversal};
use crate::domain::catalog::{BlockCatalog, Question};
use crate::domain::foundation::{Block, Progress, QuestionId};

/// Which answers produce a text log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLogPolicy {
    /// No log at all.
    Never,
    /// Only answers carrying free text, logged without their selections.
    FreeTextOnly,
    /// Every answer, with its selected option texts and free text.
    EveryAnswer,
}

/// Compile-time description of one block.
pub trait BlockKind: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    const BLOCK: Block;
    const TEXT_LOG: TextLogPolicy;

    type Traversal: Traversal;
    type Scoring: ScoringRule;
}

/// Option effect of a block kind.
pub type Effect<K> = <<K as BlockKind>::Scoring as ScoringRule>::Effect;

/// Score sheet of a block kind.
pub type Sheet<K> = <<K as BlockKind>::Scoring as ScoringRule>::Sheet;

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub question_id: QuestionId,
    pub admission: Admission,
    /// Next question of this block, `None` once the block is finished.
    pub next: Option<QuestionId>,
}

impl SubmitOutcome {
    pub fn finished(&self) -> bool {
        self.next.is_none()
    }
}

/// One block's mutable session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ScorableForm<K: BlockKind> {
    traversal: K::Traversal,
    answers: Vec<Answer>,
    scores: Sheet<K>,
    #[serde(default)]
    text_log: Vec<TextLogEntry>,
}

impl<K: BlockKind> ScorableForm<K> {
    /// Fresh state positioned on the block's first question.
    pub fn start(catalog: &BlockCatalog<Effect<K>>) -> Self {
        Self {
            traversal: K::Traversal::start(catalog.sequence()),
            answers: Vec::new(),
            scores: K::Scoring::empty_sheet(),
            text_log: Vec::new(),
        }
    }

    /// Validates and applies one submission.
    ///
    /// On error nothing is mutated.
    pub fn submit(
        &mut self,
        catalog: &BlockCatalog<Effect<K>>,
        submission: &Submission,
    ) -> Result<SubmitOutcome, FormError> {
        let question = catalog
            .get(&submission.question_id)
            .ok_or_else(|| FormError::UnknownQuestion(submission.question_id.clone()))?;

        let previous = self.answer_position(&question.id);
        let admission = self.traversal.admit(&question.id, previous.is_some())?;

        let selected = resolve_selection(question, &submission.selection)?;
        let free_text = normalize_free_text(submission.free_text.as_deref());
        if free_text.is_some() && !question.allows_free_text {
            return Err(FormError::FreeTextNotAllowed(question.id.clone()));
        }
        if selected.is_empty() && free_text.is_none() {
            return Err(FormError::EmptySubmission(question.id.clone()));
        }

        if let Some(pos) = previous {
            let old = self.answers[pos].selected.clone();
            self.score(question, &old, Direction::Retract);
            self.text_log.retain(|e| e.question_id != question.id);
        }
        self.score(question, &selected, Direction::Apply);
        self.log(question, &selected, free_text.as_deref());

        let answer = Answer {
            question_id: question.id.clone(),
            selected,
            free_text,
        };
        let follow_ups: Vec<QuestionId> = answer
            .selected
            .iter()
            .filter_map(|&i| question.option(i))
            .flat_map(|o| o.follow_ups.iter().cloned())
            .collect();
        match previous {
            Some(pos) => self.answers[pos] = answer,
            None => self.answers.push(answer),
        }

        if admission == Admission::Fresh {
            self.traversal
                .advance(&question.id, &follow_ups, catalog.sequence());
        }

        Ok(SubmitOutcome {
            question_id: question.id.clone(),
            admission,
            next: self.traversal.current().cloned(),
        })
    }

    fn score(&mut self, question: &Question<Effect<K>>, selected: &[usize], direction: Direction) {
        for option in selected.iter().filter_map(|&i| question.option(i)) {
            K::Scoring::apply(&mut self.scores, question, option, direction);
        }
    }

    fn log(&mut self, question: &Question<Effect<K>>, selected: &[usize], free_text: Option<&str>) {
        let selected = match K::TEXT_LOG {
            TextLogPolicy::Never => return,
            TextLogPolicy::FreeTextOnly if free_text.is_none() => return,
            TextLogPolicy::FreeTextOnly => Vec::new(),
            TextLogPolicy::EveryAnswer => question.option_texts(selected),
        };
        self.text_log.push(TextLogEntry {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            selected,
            free_text: free_text.map(str::to_string),
        });
    }

    pub fn block(&self) -> Block {
        K::BLOCK
    }

    fn answer_position(&self, id: &QuestionId) -> Option<usize> {
        self.answers.iter().position(|a| &a.question_id == id)
    }

    /// The question awaiting an answer, `None` once finished.
    pub fn current_question<'c>(
        &self,
        catalog: &'c BlockCatalog<Effect<K>>,
    ) -> Option<&'c Question<Effect<K>>> {
        self.traversal.current().and_then(|id| catalog.get(id))
    }

    pub fn current_id(&self) -> Option<&QuestionId> {
        self.traversal.current()
    }

    pub fn is_finished(&self) -> bool {
        self.traversal.is_finished()
    }

    pub fn progress(&self, catalog: &BlockCatalog<Effect<K>>) -> Progress {
        self.traversal.progress(catalog.sequence())
    }

    /// Answers in first-submission order.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn answer_for(&self, id: &QuestionId) -> Option<&Answer> {
        self.answers.iter().find(|a| &a.question_id == id)
    }

    pub fn scores(&self) -> &Sheet<K> {
        &self.scores
    }

    pub fn text_log(&self) -> &[TextLogEntry] {
        &self.text_log
    }

    pub fn traversal(&self) -> &K::Traversal {
        &self.traversal
    }

    /// Copies answers together with their prompts and option texts.
    pub fn recorded_answers(&self, catalog: &BlockCatalog<Effect<K>>) -> Vec<RecordedAnswer> {
        self.answers
            .iter()
            .filter_map(|a| {
                catalog
                    .get(&a.question_id)
                    .map(|q| RecordedAnswer::from_answer(q, a))
            })
            .collect()
    }
}

/// Resolves a selection to option indices and checks it against the question.
fn resolve_selection<E>(question: &Question<E>, selection: &Selection) -> Result<Vec<usize>, FormError> {
    let indices = match selection {
        Selection::Indices(indices) => indices.clone(),
        Selection::Texts(texts) => texts
            .iter()
            .map(|text| {
                question
                    .option_index_by_text(text)
                    .ok_or_else(|| FormError::UnknownOptionText {
                        question: question.id.clone(),
                        text: text.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    let options = question.options.len();
    let mut seen = HashSet::with_capacity(indices.len());
    for &index in &indices {
        if index >= options {
            return Err(FormError::OptionOutOfRange {
                question: question.id.clone(),
                index,
                options,
            });
        }
        if !seen.insert(index) {
            return Err(FormError::DuplicateOption {
                question: question.id.clone(),
                index,
            });
        }
    }

    let max = question.selection.max_selections(options);
    if indices.len() > max {
        return Err(FormError::TooManyOptions {
            question: question.id.clone(),
            max,
            got: indices.len(),
        });
    }
    Ok(indices)
}
