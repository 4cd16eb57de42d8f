//! Traversal strategies: which question a block presents next.
//!
//! # Branching (Block 1)
//!
//! A fixed backbone interleaved with follow-ups. Follow-ups chosen by an
//! answer go to a FIFO injection queue (each id at most once) and are always
//! served before the backbone resumes. The backbone cursor points at the next
//! backbone position to consider, so returning from the queue never skips a
//! backbone entry.
//!
//! # Linear (Blocks 2 and 3)
//!
//! A monotonic index over the block's questions. Answered questions may be
//! revised without moving the index.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use super::errors::FormError;
use crate::domain::foundation::{Progress, QuestionId};

/// Extra questions assumed on top of the backbone when estimating Block 1
/// progress; the real total is only known once traversal completes.
pub const INJECTION_SLACK: usize = 6;

/// How a submission relates to the traversal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The current question: answering it advances the traversal.
    Fresh,
    /// A question answered before: the answer is replaced in place.
    Revision,
}

/// Strategy deciding the order in which a block presents its questions.
pub trait Traversal:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
    /// Positions the traversal on the first question of `sequence`.
    fn start(sequence: &[QuestionId]) -> Self;

    /// The question awaiting an answer, or `None` once finished.
    fn current(&self) -> Option<&QuestionId>;

    /// Decides whether `question` may be submitted now.
    fn admit(&self, question: &QuestionId, already_answered: bool)
        -> Result<Admission, FormError>;

    /// Moves past the freshly answered current question.
    ///
    /// `follow_ups` are the ids the chosen options ask to schedule.
    fn advance(&mut self, answered: &QuestionId, follow_ups: &[QuestionId], sequence: &[QuestionId]);

    /// Completion estimate for the block.
    fn progress(&self, sequence: &[QuestionId]) -> Progress;

    fn is_finished(&self) -> bool {
        self.current().is_none()
    }
}

/// Backbone walk with injected follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchingTraversal {
    current: Option<QuestionId>,
    next_backbone: usize,
    queue: VecDeque<QuestionId>,
    answered: BTreeSet<QuestionId>,
    /// Every id ever enqueued, in discovery order.
    injected: Vec<QuestionId>,
}

impl BranchingTraversal {
    /// Pending follow-ups, in the order they will be served.
    pub fn queue(&self) -> impl Iterator<Item = &QuestionId> {
        self.queue.iter()
    }

    /// All follow-ups ever scheduled, in discovery order.
    pub fn injected(&self) -> &[QuestionId] {
        &self.injected
    }

    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    fn schedule(&mut self, follow_ups: &[QuestionId]) {
        for id in follow_ups {
            if self.answered.contains(id) || self.queue.contains(id) {
                continue;
            }
            self.queue.push_back(id.clone());
            self.injected.push(id.clone());
        }
    }

    fn next_question(&mut self, sequence: &[QuestionId]) -> Option<QuestionId> {
        while let Some(id) = self.queue.pop_front() {
            if !self.answered.contains(&id) {
                return Some(id);
            }
        }
        while let Some(candidate) = sequence.get(self.next_backbone) {
            self.next_backbone += 1;
            if !self.answered.contains(candidate) {
                return Some(candidate.clone());
            }
        }
        None
    }
}

impl Traversal for BranchingTraversal {
    fn start(sequence: &[QuestionId]) -> Self {
        Self {
            current: sequence.first().cloned(),
            next_backbone: 1,
            queue: VecDeque::new(),
            answered: BTreeSet::new(),
            injected: Vec::new(),
        }
    }

    fn current(&self) -> Option<&QuestionId> {
        self.current.as_ref()
    }

    fn admit(
        &self,
        question: &QuestionId,
        already_answered: bool,
    ) -> Result<Admission, FormError> {
        if already_answered || self.answered.contains(question) {
            return Err(FormError::AlreadyAnswered(question.clone()));
        }
        match &self.current {
            Some(current) if current == question => Ok(Admission::Fresh),
            Some(current) => Err(FormError::OutOfOrder {
                expected: current.clone(),
                submitted: question.clone(),
            }),
            None => Err(FormError::Finished(question.clone())),
        }
    }

    fn advance(&mut self, answered: &QuestionId, follow_ups: &[QuestionId], sequence: &[QuestionId]) {
        self.answered.insert(answered.clone());
        self.schedule(follow_ups);
        self.current = self.next_question(sequence);
    }

    fn progress(&self, sequence: &[QuestionId]) -> Progress {
        if self.is_finished() {
            return Progress::COMPLETE;
        }
        Progress::ratio(self.answered.len(), sequence.len() + INJECTION_SLACK)
    }
}

/// Monotonic index over a fixed question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTraversal {
    index: usize,
    current: Option<QuestionId>,
}

impl LinearTraversal {
    /// Zero-based position of the current question.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Traversal for LinearTraversal {
    fn start(sequence: &[QuestionId]) -> Self {
        Self {
            index: 0,
            current: sequence.first().cloned(),
        }
    }

    fn current(&self) -> Option<&QuestionId> {
        self.current.as_ref()
    }

    fn admit(
        &self,
        question: &QuestionId,
        already_answered: bool,
    ) -> Result<Admission, FormError> {
        if already_answered {
            return Ok(Admission::Revision);
        }
        match &self.current {
            Some(current) if current == question => Ok(Admission::Fresh),
            Some(current) => Err(FormError::OutOfOrder {
                expected: current.clone(),
                submitted: question.clone(),
            }),
            None => Err(FormError::Finished(question.clone())),
        }
    }

    fn advance(&mut self, _answered: &QuestionId, _follow_ups: &[QuestionId], sequence: &[QuestionId]) {
        self.index += 1;
        self.current = sequence.get(self.index).cloned();
    }

    fn progress(&self, sequence: &[QuestionId]) -> Progress {
        Progress::ratio(self.index, sequence.len())
    }
}
