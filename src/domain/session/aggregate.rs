//! Questionnaire session aggregate.
//!
//! A session owns one engine per block and walks them strictly in order:
//! Block 1, then Block 2, then Block 3. Only this aggregate reads across the
//! engines; each engine only ever sees its own block of the catalog.
//!
//! The catalog is passed into every operation rather than stored, so the
//! session serializes to plain data and can be kept in any `SessionStore`.

use serde::{Deserialize, Serialize};

use super::errors::SessionError;
use super::record::{ChildhoodRecord, ColumnsRecord, SessionRecord, VocationRecord};
use super::stage::SessionStage;
use crate::domain::catalog::{Catalog, PresentedQuestion};
use crate::domain::foundation::{
    Block, Progress, QuestionId, SessionId, StateMachine, SubjectName, Timestamp,
};
use crate::domain::questionnaire::{
    Admission, BranchingEngine, GroupedEngine, Submission, SubmitOutcome, WeightedEngine,
};

/// Questionnaire session aggregate.
///
/// # Invariants
///
/// - `stage` names the only block accepting submissions
/// - every block before the active one is finished
/// - once `Finalized`, nothing changes any more
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSession {
    /// Unique identifier for this session.
    id: SessionId,

    /// Name the report is filed under.
    subject: SubjectName,

    stage: SessionStage,

    childhood: BranchingEngine,
    vocation: WeightedEngine,
    columns: GroupedEngine,

    /// When the session was started.
    started_at: Timestamp,

    /// When the last answer was accepted.
    updated_at: Timestamp,
}

/// Result of an accepted submission, seen from the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerAccepted {
    pub question_id: QuestionId,
    pub block: Block,
    pub admission: Admission,
    /// True when this answer finished its block.
    pub block_finished: bool,
    /// Stage after the answer was applied.
    pub stage: SessionStage,
    /// Next question to present, `None` once every block is finished.
    pub next: Option<QuestionId>,
}

/// Progress of the active block together with the session stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub stage: SessionStage,
    pub block: Option<Block>,
    pub progress: Progress,
}

impl QuestionnaireSession {
    /// Starts a session positioned on the first Block 1 question.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the subject name is empty or too long
    pub fn start(subject: &str, catalog: &Catalog) -> Result<Self, SessionError> {
        let subject = SubjectName::new(subject)?;
        let now = Timestamp::now();
        Ok(Self {
            id: SessionId::new(),
            subject,
            stage: SessionStage::Childhood,
            childhood: BranchingEngine::start(&catalog.childhood),
            vocation: WeightedEngine::start(&catalog.vocation),
            columns: GroupedEngine::start(&catalog.columns),
            started_at: now,
            updated_at: now,
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn subject(&self) -> &SubjectName {
        &self.subject
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn childhood(&self) -> &BranchingEngine {
        &self.childhood
    }

    pub fn vocation(&self) -> &WeightedEngine {
        &self.vocation
    }

    pub fn columns(&self) -> &GroupedEngine {
        &self.columns
    }

    pub fn is_finalized(&self) -> bool {
        self.stage == SessionStage::Finalized
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    /// The question awaiting an answer, `None` once all blocks are finished.
    pub fn current_question(&self, catalog: &Catalog) -> Option<PresentedQuestion> {
        match self.stage.active_block()? {
            Block::Childhood => self
                .childhood
                .current_question(&catalog.childhood)
                .map(|q| q.present()),
            Block::Vocation => self
                .vocation
                .current_question(&catalog.vocation)
                .map(|q| q.present()),
            Block::Columns => self
                .columns
                .current_question(&catalog.columns)
                .map(|q| q.present()),
        }
    }

    pub fn current_id(&self) -> Option<&QuestionId> {
        match self.stage.active_block()? {
            Block::Childhood => self.childhood.current_id(),
            Block::Vocation => self.vocation.current_id(),
            Block::Columns => self.columns.current_id(),
        }
    }

    /// Progress of the active block; complete once all blocks are finished.
    pub fn progress(&self, catalog: &Catalog) -> SessionProgress {
        let block = self.stage.active_block();
        let progress = match block {
            Some(Block::Childhood) => self.childhood.progress(&catalog.childhood),
            Some(Block::Vocation) => self.vocation.progress(&catalog.vocation),
            Some(Block::Columns) => self.columns.progress(&catalog.columns),
            None => Progress::COMPLETE,
        };
        SessionProgress {
            stage: self.stage,
            block,
            progress,
        }
    }

    /// First block whose engine is not finished.
    pub fn pending_block(&self) -> Option<Block> {
        if !self.childhood.is_finished() {
            Some(Block::Childhood)
        } else if !self.vocation.is_finished() {
            Some(Block::Vocation)
        } else if !self.columns.is_finished() {
            Some(Block::Columns)
        } else {
            None
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Commands
    // ───────────────────────────────────────────────────────────────

    /// Routes a submission to the block owning the question.
    ///
    /// Answered questions of a finished vocation or columns block can be
    /// resubmitted until finalize; the stage does not move on a revision.
    /// On error the session is left untouched.
    ///
    /// # Errors
    ///
    /// - `AlreadyFinalized` once the record was produced
    /// - `QuestionNotFound` if no block defines the question
    /// - `WrongBlock` if the question's block is not the active one and
    ///   the question is not a revision of a finished block
    /// - `Form` if the owning engine rejects the submission
    pub fn submit(
        &mut self,
        catalog: &Catalog,
        submission: &Submission,
    ) -> Result<AnswerAccepted, SessionError> {
        if self.is_finalized() {
            return Err(SessionError::AlreadyFinalized(self.id));
        }
        let question = &submission.question_id;
        let owner = catalog
            .owner_of(question)
            .ok_or_else(|| SessionError::QuestionNotFound(question.clone()))?;
        let active = self.stage.active_block();
        if active != Some(owner) && !self.revises_finished_block(owner, question) {
            return Err(SessionError::WrongBlock {
                question: question.clone(),
                submitted: owner,
                active,
            });
        }

        let outcome: SubmitOutcome = match owner {
            Block::Childhood => self.childhood.submit(&catalog.childhood, submission)?,
            Block::Vocation => self.vocation.submit(&catalog.vocation, submission)?,
            Block::Columns => self.columns.submit(&catalog.columns, submission)?,
        };

        let block_finished = active == Some(owner) && outcome.finished();
        if block_finished {
            self.advance_stage()?;
        }
        self.updated_at = Timestamp::now();

        Ok(AnswerAccepted {
            question_id: outcome.question_id,
            block: owner,
            admission: outcome.admission,
            block_finished,
            stage: self.stage,
            next: self.current_id().cloned(),
        })
    }

    /// Assembles the session record and moves to `Finalized`.
    ///
    /// # Errors
    ///
    /// - `AlreadyFinalized` when called a second time
    /// - `NotReady` naming the first unfinished block
    pub fn finalize(&mut self, catalog: &Catalog) -> Result<SessionRecord, SessionError> {
        if self.is_finalized() {
            return Err(SessionError::AlreadyFinalized(self.id));
        }
        if let Some(pending) = self.pending_block() {
            return Err(SessionError::not_ready(pending));
        }
        let next = self
            .stage
            .transition_to(SessionStage::Finalized)
            .map_err(|e| SessionError::invalid_state(e.to_string()))?;

        let record = SessionRecord {
            session_id: self.id,
            subject: self.subject.clone(),
            started_at: self.started_at,
            finalized_at: Timestamp::now(),
            childhood: ChildhoodRecord {
                scores: self.childhood.scores().clone(),
                answers: self.childhood.recorded_answers(&catalog.childhood),
            },
            vocation: VocationRecord {
                scores: self.vocation.scores().clone(),
                answers: self.vocation.recorded_answers(&catalog.vocation),
                text_log: self.vocation.text_log().to_vec(),
            },
            columns: ColumnsRecord {
                scores: self.columns.scores().clone(),
                answers: self.columns.recorded_answers(&catalog.columns),
                text_log: self.columns.text_log().to_vec(),
            },
        };

        self.stage = next;
        self.updated_at = record.finalized_at;
        Ok(record)
    }

    /// Childhood answers are final; the linear blocks take overwrites.
    fn revises_finished_block(&self, block: Block, question: &QuestionId) -> bool {
        match block {
            Block::Childhood => false,
            Block::Vocation => {
                self.vocation.is_finished() && self.vocation.answer_for(question).is_some()
            }
            Block::Columns => {
                self.columns.is_finished() && self.columns.answer_for(question).is_some()
            }
        }
    }

    fn advance_stage(&mut self) -> Result<(), SessionError> {
        let Some(target) = self.stage.after_block() else {
            return Ok(());
        };
        self.stage = self
            .stage
            .transition_to(target)
            .map_err(|e| SessionError::invalid_state(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Potential;
    use crate::domain::questionnaire::FormError;
    use std::sync::Arc;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn catalog() -> Arc<Catalog> {
        Catalog::builtin().unwrap()
    }

    /// Answers every remaining question of the active block with option 0.
    fn finish_block(session: &mut QuestionnaireSession, catalog: &Catalog) {
        let block = session.stage().active_block().unwrap();
        while session.stage().active_block() == Some(block) {
            let id = session.current_id().unwrap().clone();
            session
                .submit(catalog, &Submission::choose(id, 0))
                .unwrap();
        }
    }

    #[test]
    fn start_positions_on_first_backbone_question() {
        let catalog = catalog();
        let session = QuestionnaireSession::start("  Anna  ", &catalog).unwrap();

        assert_eq!(session.subject().as_str(), "Anna");
        assert_eq!(session.stage(), SessionStage::Childhood);
        let question = session.current_question(&catalog).unwrap();
        assert_eq!(question.id, qid("b1_q1_free_play"));
        assert_eq!(question.block, Block::Childhood);
    }

    #[test]
    fn start_rejects_blank_subject() {
        let catalog = catalog();
        let err = QuestionnaireSession::start("   ", &catalog).unwrap_err();
        assert!(matches!(err, SessionError::ValidationFailed { .. }));
    }

    #[test]
    fn submit_routes_to_active_block_and_reports_injection() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();

        let accepted = session
            .submit(&catalog, &Submission::choose(qid("b1_q1_free_play"), 0))
            .unwrap();

        assert_eq!(accepted.block, Block::Childhood);
        assert!(!accepted.block_finished);
        assert_eq!(accepted.next, Some(qid("b1_q7_sport_detail")));
        assert_eq!(session.childhood().scores().get(Potential::Shungit), 2);
    }

    #[test]
    fn submit_rejects_question_of_inactive_block() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        let before = session.clone();

        let err = session
            .submit(&catalog, &Submission::choose(qid("c1_q1"), 0))
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::WrongBlock {
                submitted: Block::Columns,
                active: Some(Block::Childhood),
                ..
            }
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn submit_rejects_unknown_question() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        let err = session
            .submit(&catalog, &Submission::choose(qid("nope"), 0))
            .unwrap_err();
        assert_eq!(err, SessionError::QuestionNotFound(qid("nope")));
    }

    #[test]
    fn engine_errors_surface_as_form_errors() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        let err = session
            .submit(&catalog, &Submission::choose(qid("b1_q2_subjects"), 0))
            .unwrap_err();
        assert!(matches!(err, SessionError::Form(FormError::OutOfOrder { .. })));
    }

    #[test]
    fn finishing_a_block_advances_the_stage() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();

        finish_block(&mut session, &catalog);
        assert_eq!(session.stage(), SessionStage::Vocation);
        assert!(session.childhood().is_finished());
        assert_eq!(
            session.current_id(),
            catalog.vocation.sequence().first()
        );

        finish_block(&mut session, &catalog);
        assert_eq!(session.stage(), SessionStage::Columns);

        finish_block(&mut session, &catalog);
        assert_eq!(session.stage(), SessionStage::Complete);
        assert_eq!(session.current_question(&catalog), None);
        assert_eq!(session.progress(&catalog).progress, Progress::COMPLETE);
    }

    #[test]
    fn last_vocation_answer_can_be_revised_after_block_finishes() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        finish_block(&mut session, &catalog);
        finish_block(&mut session, &catalog);
        assert_eq!(session.stage(), SessionStage::Columns);

        let last = qid("money_and_value");
        assert_eq!(catalog.vocation.sequence().last(), Some(&last));
        let before = session.vocation().answer_for(&last).unwrap().selected.clone();
        assert_eq!(before, vec![0]);

        let accepted = session
            .submit(&catalog, &Submission::choose(last.clone(), 1))
            .unwrap();

        assert_eq!(accepted.block, Block::Vocation);
        assert_eq!(accepted.admission, Admission::Revision);
        assert!(!accepted.block_finished);
        assert_eq!(accepted.stage, SessionStage::Columns);
        assert_eq!(accepted.next, Some(qid("c1_q1")));
        assert_eq!(session.stage(), SessionStage::Columns);
        assert_eq!(session.vocation().answer_for(&last).unwrap().selected, vec![1]);
        assert_eq!(session.vocation().answers().len(), catalog.vocation.len());
    }

    #[test]
    fn last_columns_answer_can_be_resubmitted_before_finalize() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        for _ in 0..3 {
            finish_block(&mut session, &catalog);
        }
        let totals: Vec<f64> = Potential::ALL
            .iter()
            .map(|&p| session.columns().scores().tally(p).total())
            .collect();

        let accepted = session
            .submit(&catalog, &Submission::choose(qid("c3_q5"), 0))
            .unwrap();

        assert_eq!(accepted.admission, Admission::Revision);
        assert_eq!(session.stage(), SessionStage::Complete);
        let after: Vec<f64> = Potential::ALL
            .iter()
            .map(|&p| session.columns().scores().tally(p).total())
            .collect();
        assert_eq!(after, totals);
        assert!(session.finalize(&catalog).is_ok());
    }

    #[test]
    fn childhood_answers_stay_closed_after_block_finishes() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        finish_block(&mut session, &catalog);
        let before = session.clone();

        let err = session
            .submit(&catalog, &Submission::choose(qid("b1_q1_free_play"), 1))
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::WrongBlock {
                submitted: Block::Childhood,
                active: Some(Block::Vocation),
                ..
            }
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn progress_reports_active_block() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        finish_block(&mut session, &catalog);

        let first = session.current_id().unwrap().clone();
        session
            .submit(&catalog, &Submission::choose(first, 0))
            .unwrap();

        let progress = session.progress(&catalog);
        assert_eq!(progress.stage, SessionStage::Vocation);
        assert_eq!(progress.block, Some(Block::Vocation));
        assert_eq!(
            progress.progress,
            Progress::ratio(1, catalog.vocation.len())
        );
    }

    #[test]
    fn finalize_before_ready_names_pending_block() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        finish_block(&mut session, &catalog);
        finish_block(&mut session, &catalog);

        let err = session.finalize(&catalog).unwrap_err();
        assert_eq!(err, SessionError::not_ready(Block::Columns));
        assert_eq!(session.stage(), SessionStage::Columns);
    }

    #[test]
    fn finalize_produces_record_once() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        for _ in 0..3 {
            finish_block(&mut session, &catalog);
        }

        let record = session.finalize(&catalog).unwrap();
        assert_eq!(record.session_id, session.id());
        assert_eq!(record.subject.as_str(), "Anna");
        assert_eq!(record.columns.answers.len(), catalog.columns.len());
        assert_eq!(record.vocation.answers.len(), catalog.vocation.len());
        assert_eq!(
            record.childhood.answers.len(),
            catalog.childhood.sequence().len() + session.childhood().traversal().injected().len()
        );
        assert_eq!(session.stage(), SessionStage::Finalized);

        let err = session.finalize(&catalog).unwrap_err();
        assert_eq!(err, SessionError::AlreadyFinalized(session.id()));
    }

    #[test]
    fn finalized_session_rejects_submissions() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        for _ in 0..3 {
            finish_block(&mut session, &catalog);
        }
        session.finalize(&catalog).unwrap();

        let err = session
            .submit(&catalog, &Submission::choose(qid("c1_q1"), 0))
            .unwrap_err();
        assert!(matches!(err, SessionError::AlreadyFinalized(_)));
    }

    #[test]
    fn session_survives_json_round_trip() {
        let catalog = catalog();
        let mut session = QuestionnaireSession::start("Anna", &catalog).unwrap();
        session
            .submit(&catalog, &Submission::choose(qid("b1_q1_free_play"), 0))
            .unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: QuestionnaireSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
