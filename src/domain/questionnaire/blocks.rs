//! The three concrete block engines.

use super::form::{BlockKind, ScorableForm, TextLogPolicy};
use super::scoring::{AdditiveDeltas, GroupedTally};
use super::traversal::{BranchingTraversal, LinearTraversal};
use crate::domain::foundation::Block;

/// Block 1: branching traversal, integer deltas, no text log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildhoodBlock;

impl BlockKind for ChildhoodBlock {
    const BLOCK: Block = Block::Childhood;
    const TEXT_LOG: TextLogPolicy = TextLogPolicy::Never;

    type Traversal = BranchingTraversal;
    type Scoring = AdditiveDeltas<i32>;
}

/// Block 2: linear traversal, fractional deltas, free text logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocationBlock;

impl BlockKind for VocationBlock {
    const BLOCK: Block = Block::Vocation;
    const TEXT_LOG: TextLogPolicy = TextLogPolicy::FreeTextOnly;

    type Traversal = LinearTraversal;
    type Scoring = AdditiveDeltas<f64>;
}

/// Block 3: linear traversal, per-group tallies, every answer logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnsBlock;

impl BlockKind for ColumnsBlock {
    const BLOCK: Block = Block::Columns;
    const TEXT_LOG: TextLogPolicy = TextLogPolicy::EveryAnswer;

    type Traversal = LinearTraversal;
    type Scoring = GroupedTally;
}

pub type BranchingEngine = ScorableForm<ChildhoodBlock>;
pub type WeightedEngine = ScorableForm<VocationBlock>;
pub type GroupedEngine = ScorableForm<ColumnsBlock>;
