//! Questionnaire engines.
//!
//! The three blocks share one generic [`ScorableForm`], parameterized by a
//! traversal strategy (branching or linear) and a scoring strategy (additive
//! deltas or grouped tallies):
//!
//! | Block | Engine | Traversal | Scoring |
//! |---|---|---|---|
//! | 1 | [`BranchingEngine`] | [`BranchingTraversal`] | [`AdditiveDeltas<i32>`] |
//! | 2 | [`WeightedEngine`] | [`LinearTraversal`] | [`AdditiveDeltas<f64>`] |
//! | 3 | [`GroupedEngine`] | [`LinearTraversal`] | [`GroupedTally`] |

mod answer;
mod blocks;
mod errors;
mod form;
mod scoring;
mod traversal;

pub use answer::{Answer, RecordedAnswer, Selection, Submission, TextLogEntry};
pub use blocks::{
    BranchingEngine, ChildhoodBlock, ColumnsBlock, GroupedEngine, VocationBlock, WeightedEngine,
};
pub use errors::FormError;
pub use form::{BlockKind, Effect, ScorableForm, Sheet, SubmitOutcome, TextLogPolicy};
pub use scoring::{
    AdditiveDeltas, ColumnSheet, ColumnTally, Direction, GroupedTally, ScoreSheet, ScoreValue,
    ScoringRule,
};
pub use traversal::{Admission, BranchingTraversal, LinearTraversal, Traversal, INJECTION_SLACK};
