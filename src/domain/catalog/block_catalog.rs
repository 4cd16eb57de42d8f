//! Validated, indexed question list of one block.

use std::collections::{HashMap, HashSet};

use super::errors::CatalogError;
use super::question::Question;
use crate::domain::foundation::{Block, QuestionId};

/// Questions of one block plus the ordered sequence a traversal walks.
///
/// For linear blocks the sequence is every question in declaration order.
/// For Block 1 it is the backbone; the remaining questions are reachable only
/// as follow-ups.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCatalog<E> {
    block: Block,
    questions: Vec<Question<E>>,
    index: HashMap<QuestionId, usize>,
    sequence: Vec<QuestionId>,
}

impl<E> BlockCatalog<E> {
    /// Builds a linear block: the sequence is every question in order.
    pub fn linear(block: Block, questions: Vec<Question<E>>) -> Result<Self, CatalogError> {
        let sequence = questions.iter().map(|q| q.id.clone()).collect();
        let catalog = Self::build(block, questions, sequence)?;

        for q in &catalog.questions {
            if q.options.iter().any(|o| !o.follow_ups.is_empty()) {
                return Err(CatalogError::UnexpectedFollowUps(q.id.to_string()));
            }
        }
        Ok(catalog)
    }

    /// Builds a branching block walked along `backbone`.
    ///
    /// Every follow-up must name a question of this block that is not itself
    /// on the backbone.
    pub fn branching(
        block: Block,
        questions: Vec<Question<E>>,
        backbone: Vec<QuestionId>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self::build(block, questions, backbone)?;

        let mut seen = HashSet::new();
        for id in &catalog.sequence {
            if !catalog.index.contains_key(id) {
                return Err(CatalogError::UnknownBackboneQuestion(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateBackboneEntry(id.to_string()));
            }
        }

        for q in &catalog.questions {
            for follow_up in q.options.iter().flat_map(|o| o.follow_ups.iter()) {
                if !catalog.index.contains_key(follow_up) {
                    return Err(CatalogError::UnknownFollowUp {
                        question: q.id.to_string(),
                        follow_up: follow_up.to_string(),
                    });
                }
                if seen.contains(follow_up) {
                    return Err(CatalogError::FollowUpOnBackbone {
                        question: q.id.to_string(),
                        follow_up: follow_up.to_string(),
                    });
                }
            }
        }
        Ok(catalog)
    }

    fn build(
        block: Block,
        questions: Vec<Question<E>>,
        sequence: Vec<QuestionId>,
    ) -> Result<Self, CatalogError> {
        if questions.is_empty() || sequence.is_empty() {
            return Err(CatalogError::EmptyBlock { block });
        }

        let mut index = HashMap::with_capacity(questions.len());
        for (pos, q) in questions.iter().enumerate() {
            if q.block != block {
                return Err(CatalogError::invalid_question(
                    q.id.as_str(),
                    format!("belongs to {} but is listed in {}", q.block, block),
                ));
            }
            if q.options.is_empty() {
                return Err(CatalogError::NoOptions(q.id.to_string()));
            }
            let mut texts = HashSet::new();
            for option in &q.options {
                if !texts.insert(option.text.as_str()) {
                    return Err(CatalogError::DuplicateOptionText {
                        question: q.id.to_string(),
                        text: option.text.clone(),
                    });
                }
            }
            if index.insert(q.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateQuestion(q.id.to_string()));
            }
        }

        Ok(Self {
            block,
            questions,
            index,
            sequence,
        })
    }

    pub fn block(&self) -> Block {
        self.block
    }

    /// Looks a question up by id.
    pub fn get(&self, id: &QuestionId) -> Option<&Question<E>> {
        self.index.get(id).map(|&pos| &self.questions[pos])
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.index.contains_key(id)
    }

    /// All questions in declaration order.
    pub fn questions(&self) -> &[Question<E>] {
        &self.questions
    }

    /// The ordered sequence a traversal walks.
    pub fn sequence(&self) -> &[QuestionId] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::question::AnswerOption;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn question(id: &str, follow_ups: &[&str]) -> Question<i32> {
        Question::new(qid(id), Block::Childhood, format!("prompt {}", id)).with_option(
            AnswerOption::new("yes", 1).with_follow_ups(follow_ups.iter().map(|s| qid(s)).collect()),
        )
    }

    #[test]
    fn linear_sequence_is_declaration_order() {
        let catalog = BlockCatalog::linear(
            Block::Childhood,
            vec![question("a", &[]), question("b", &[])],
        )
        .unwrap();
        assert_eq!(catalog.sequence(), &[qid("a"), qid("b")]);
        assert_eq!(catalog.get(&qid("b")).unwrap().prompt, "prompt b");
    }

    #[test]
    fn linear_block_rejects_follow_ups() {
        let err = BlockCatalog::linear(
            Block::Childhood,
            vec![question("a", &["b"]), question("b", &[])],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::UnexpectedFollowUps("a".into()));
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let err = BlockCatalog::linear(Block::Childhood, vec![question("a", &[]), question("a", &[])])
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateQuestion("a".into()));
    }

    #[test]
    fn empty_block_is_rejected() {
        let err = BlockCatalog::<i32>::linear(Block::Vocation, vec![]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyBlock { block: Block::Vocation });
    }

    #[test]
    fn branching_rejects_unknown_follow_up() {
        let err = BlockCatalog::branching(
            Block::Childhood,
            vec![question("a", &["missing"])],
            vec![qid("a")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownFollowUp { .. }));
    }

    #[test]
    fn branching_rejects_follow_up_onto_backbone() {
        let err = BlockCatalog::branching(
            Block::Childhood,
            vec![question("a", &["b"]), question("b", &[])],
            vec![qid("a"), qid("b")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::FollowUpOnBackbone { .. }));
    }

    #[test]
    fn branching_rejects_unknown_backbone_entry() {
        let err = BlockCatalog::branching(
            Block::Childhood,
            vec![question("a", &[])],
            vec![qid("a"), qid("ghost")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::UnknownBackboneQuestion("ghost".into()));
    }

    #[test]
    fn duplicate_option_texts_are_rejected() {
        let q = question("a", &[]).with_option(AnswerOption::new("yes", 2));
        let err = BlockCatalog::linear(Block::Childhood, vec![q]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateOptionText { .. }));
    }
}
