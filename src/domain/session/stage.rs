//! SessionStage enum tracking which block a session is working through.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Block, StateMachine};

/// Lifecycle stage of a questionnaire session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    #[default]
    Childhood,
    Vocation,
    Columns,
    /// All three blocks finished, record not yet produced.
    Complete,
    Finalized,
}

impl SessionStage {
    /// The block accepting submissions, if any.
    pub fn active_block(&self) -> Option<Block> {
        match self {
            SessionStage::Childhood => Some(Block::Childhood),
            SessionStage::Vocation => Some(Block::Vocation),
            SessionStage::Columns => Some(Block::Columns),
            SessionStage::Complete | SessionStage::Finalized => None,
        }
    }

    /// Stage entered once the active block finishes.
    pub fn after_block(&self) -> Option<SessionStage> {
        match self {
            SessionStage::Childhood => Some(SessionStage::Vocation),
            SessionStage::Vocation => Some(SessionStage::Columns),
            SessionStage::Columns => Some(SessionStage::Complete),
            SessionStage::Complete | SessionStage::Finalized => None,
        }
    }

    pub fn is_answering(&self) -> bool {
        self.active_block().is_some()
    }
}

impl StateMachine for SessionStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Valid transitions:
    /// - Childhood -> Vocation -> Columns -> Complete
    /// - Complete -> Finalized
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SessionStage::Complete => vec![SessionStage::Finalized],
            SessionStage::Finalized => vec![],
            stage => stage.after_block().into_iter().collect(),
        }
    }
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStage::Childhood => "childhood",
            SessionStage::Vocation => "vocation",
            SessionStage::Columns => "columns",
            SessionStage::Complete => "complete",
            SessionStage::Finalized => "finalized",
        };
        write!(f, "{}", s)
    }
}
