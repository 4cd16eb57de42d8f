//! Catalog loading from YAML, plus the process-wide built-in catalog.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use super::block_catalog::BlockCatalog;
use super::errors::CatalogError;
use super::question::{AnswerOption, Deltas, Group, Question, Section, SelectionMode};
use crate::domain::foundation::{Block, Potential, QuestionId};

const BLOCK1_YAML: &str = include_str!("data/block1.yaml");
const BLOCK2_YAML: &str = include_str!("data/block2.yaml");
const BLOCK3_YAML: &str = include_str!("data/block3.yaml");

/// File names looked up when loading a catalog from a directory.
pub const CATALOG_FILES: [&str; 3] = ["block1.yaml", "block2.yaml", "block3.yaml"];

static BUILTIN: Lazy<Result<Arc<Catalog>, CatalogError>> =
    Lazy::new(|| Catalog::from_yaml(BLOCK1_YAML, BLOCK2_YAML, BLOCK3_YAML).map(Arc::new));

/// The three block catalogs of a questionnaire.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub childhood: BlockCatalog<Deltas<i32>>,
    pub vocation: BlockCatalog<Deltas<f64>>,
    pub columns: BlockCatalog<Vec<Potential>>,
}

impl Catalog {
    /// The catalog compiled into the binary, parsed once per process.
    pub fn builtin() -> Result<Arc<Catalog>, CatalogError> {
        BUILTIN.clone()
    }

    /// Parses and validates the three block documents.
    pub fn from_yaml(block1: &str, block2: &str, block3: &str) -> Result<Self, CatalogError> {
        let childhood = parse_childhood(block1)?;
        let vocation = parse_vocation(block2)?;
        let columns = parse_columns(block3)?;

        let mut ids = HashSet::new();
        let all_ids = childhood
            .questions()
            .iter()
            .map(|q| &q.id)
            .chain(vocation.questions().iter().map(|q| &q.id))
            .chain(columns.questions().iter().map(|q| &q.id));
        for id in all_ids {
            if !ids.insert(id) {
                return Err(CatalogError::DuplicateQuestion(id.to_string()));
            }
        }

        Ok(Self {
            childhood,
            vocation,
            columns,
        })
    }

    /// Loads `block1.yaml`, `block2.yaml` and `block3.yaml` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        };
        Self::from_yaml(
            &read(CATALOG_FILES[0])?,
            &read(CATALOG_FILES[1])?,
            &read(CATALOG_FILES[2])?,
        )
    }

    /// Returns the block that owns `id`, if any.
    pub fn owner_of(&self, id: &QuestionId) -> Option<Block> {
        if self.childhood.contains(id) {
            Some(Block::Childhood)
        } else if self.vocation.contains(id) {
            Some(Block::Vocation)
        } else if self.columns.contains(id) {
            Some(Block::Columns)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Raw documents
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBlock {
    #[serde(default)]
    backbone: Vec<String>,
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawQuestion {
    id: String,
    prompt: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    section: Option<Section>,
    #[serde(default)]
    group: Option<Group>,
    #[serde(default)]
    selection: Option<SelectionMode>,
    #[serde(default)]
    free_text: Option<bool>,
    options: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOption {
    #[serde(default)]
    key: Option<String>,
    text: String,
    #[serde(default)]
    scores: Option<BTreeMap<Potential, f64>>,
    #[serde(default)]
    potentials: Option<Vec<Potential>>,
    #[serde(default)]
    follow_ups: Vec<String>,
}

fn parse_raw(block: Block, yaml: &str) -> Result<RawBlock, CatalogError> {
    serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse {
        block,
        message: e.to_string(),
    })
}

fn question_id(block: Block, raw: &str) -> Result<QuestionId, CatalogError> {
    QuestionId::new(raw).map_err(|_| CatalogError::BlankQuestionId { block })
}

fn reject(condition: bool, question: &str, reason: &str) -> Result<(), CatalogError> {
    if condition {
        Err(CatalogError::invalid_question(question, reason))
    } else {
        Ok(())
    }
}

fn parse_childhood(yaml: &str) -> Result<BlockCatalog<Deltas<i32>>, CatalogError> {
    let block = Block::Childhood;
    let raw = parse_raw(block, yaml)?;

    let mut questions = Vec::with_capacity(raw.questions.len());
    for rq in raw.questions {
        let id = question_id(block, &rq.id)?;
        reject(rq.group.is_some(), &rq.id, "only column questions carry a group")?;
        reject(rq.section.is_some(), &rq.id, "only vocation questions carry a section")?;
        reject(
            rq.selection == Some(SelectionMode::Multiple),
            &rq.id,
            "branching questions are single-select",
        )?;
        reject(
            rq.free_text == Some(true),
            &rq.id,
            "branching questions take no free text",
        )?;

        let mut question = Question::new(id, block, rq.prompt);
        if let Some(title) = rq.title {
            question = question.with_title(title);
        }
        for ro in rq.options {
            reject(ro.potentials.is_some(), &rq.id, "options must use scores")?;
            let mut deltas = Deltas::new();
            for (potential, value) in ro.scores.unwrap_or_default() {
                if value.fract() != 0.0 || value.abs() > i32::MAX as f64 {
                    return Err(CatalogError::NonIntegerDelta {
                        question: rq.id.clone(),
                        potential: potential.to_string(),
                        value,
                    });
                }
                deltas.insert(potential, value as i32);
            }
            let follow_ups = ro
                .follow_ups
                .iter()
                .map(|f| question_id(block, f))
                .collect::<Result<Vec<_>, _>>()?;
            let mut option = AnswerOption::new(ro.text, deltas).with_follow_ups(follow_ups);
            option.key = ro.key;
            question = question.with_option(option);
        }
        questions.push(question);
    }

    let backbone = raw
        .backbone
        .iter()
        .map(|id| question_id(block, id))
        .collect::<Result<Vec<_>, _>>()?;

    BlockCatalog::branching(block, questions, backbone)
}

fn parse_vocation(yaml: &str) -> Result<BlockCatalog<Deltas<f64>>, CatalogError> {
    let block = Block::Vocation;
    let raw = parse_raw(block, yaml)?;
    reject(!raw.backbone.is_empty(), "backbone", "linear blocks have no backbone")?;

    let mut questions = Vec::with_capacity(raw.questions.len());
    for rq in raw.questions {
        let id = question_id(block, &rq.id)?;
        reject(rq.group.is_some(), &rq.id, "only column questions carry a group")?;
        let section = rq
            .section
            .ok_or_else(|| CatalogError::invalid_question(&rq.id, "missing section"))?;

        let mut question = Question::new(id, block, rq.prompt)
            .with_section(section)
            .with_selection(rq.selection.unwrap_or_default())
            .with_free_text(rq.free_text.unwrap_or(false));
        if let Some(title) = rq.title {
            question = question.with_title(title);
        }
        for ro in rq.options {
            reject(ro.potentials.is_some(), &rq.id, "options must use scores")?;
            reject(!ro.follow_ups.is_empty(), &rq.id, "linear blocks declare no follow-ups")?;
            let deltas: Deltas<f64> = ro.scores.unwrap_or_default();
            if let Some((potential, value)) = deltas.iter().find(|(_, v)| !v.is_finite()) {
                return Err(CatalogError::invalid_question(
                    &rq.id,
                    format!("delta {} for {} is not finite", value, potential),
                ));
            }
            let mut option = AnswerOption::new(ro.text, deltas);
            option.key = ro.key;
            question = question.with_option(option);
        }
        questions.push(question);
    }

    BlockCatalog::linear(block, questions)
}

fn parse_columns(yaml: &str) -> Result<BlockCatalog<Vec<Potential>>, CatalogError> {
    let block = Block::Columns;
    let raw = parse_raw(block, yaml)?;
    reject(!raw.backbone.is_empty(), "backbone", "linear blocks have no backbone")?;

    let mut questions = Vec::with_capacity(raw.questions.len());
    for rq in raw.questions {
        let id = question_id(block, &rq.id)?;
        reject(rq.section.is_some(), &rq.id, "only vocation questions carry a section")?;
        let group = rq
            .group
            .ok_or_else(|| CatalogError::invalid_question(&rq.id, "missing group"))?;

        let mut question = Question::new(id, block, rq.prompt)
            .with_group(group)
            .with_selection(rq.selection.unwrap_or(SelectionMode::Multiple))
            .with_free_text(rq.free_text.unwrap_or(true));
        if let Some(title) = rq.title {
            question = question.with_title(title);
        }
        for ro in rq.options {
            reject(ro.scores.is_some(), &rq.id, "options must list potentials")?;
            reject(!ro.follow_ups.is_empty(), &rq.id, "linear blocks declare no follow-ups")?;
            let mut option = AnswerOption::new(ro.text, ro.potentials.unwrap_or_default());
            option.key = ro.key;
            question = question.with_option(option);
        }
        questions.push(question);
    }

    BlockCatalog::linear(block, questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    const MINI_B1: &str = r#"
backbone: [a1, a2]
questions:
  - id: a1
    prompt: First?
    options:
      - text: Outdoors
        scores: { Shungit: 2 }
        follow_ups: [a_detail]
      - text: Nothing
  - id: a2
    prompt: Second?
    options:
      - text: Agreed
        scores: { Amber: 1 }
  - id: a_detail
    prompt: Detail?
    options:
      - text: Strength
        scores: { Shungit: 2 }
"#;

    const MINI_B2: &str = r#"
questions:
  - id: v1
    section: work
    selection: multiple
    free_text: true
    prompt: Work?
    options:
      - text: A
        scores: { Amethyst: 0.7 }
      - text: B
        scores: { Amethyst: 0.3, Amber: -0.5 }
"#;

    const MINI_B3: &str = r#"
questions:
  - id: c1
    group: perception
    title: Wow
    prompt: Wow?
    options:
      - key: deep
        text: Deep thoughts
        potentials: [Amethyst, Sapphire]
      - key: other
        text: Other
        potentials: []
"#;

    #[test]
    fn builtin_catalog_loads_and_has_expected_shape() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.childhood.sequence().len(), 15);
        assert_eq!(catalog.childhood.len(), 23);
        assert_eq!(catalog.vocation.len(), 12);
        assert_eq!(catalog.columns.len(), 15);
    }

    #[test]
    fn builtin_first_option_injects_sport_detail() {
        let catalog = Catalog::builtin().unwrap();
        let q1 = catalog.childhood.get(&qid("b1_q1_free_play")).unwrap();
        let outdoors = &q1.options[0];
        assert_eq!(outdoors.effect.get(&Potential::Shungit), Some(&2));
        assert_eq!(outdoors.follow_ups, vec![qid("b1_q7_sport_detail")]);
    }

    #[test]
    fn builtin_columns_have_five_questions_per_group() {
        let catalog = Catalog::builtin().unwrap();
        for group in Group::ALL {
            let count = catalog
                .columns
                .questions()
                .iter()
                .filter(|q| q.group == Some(group))
                .count();
            assert_eq!(count, 5, "group {}", group);
        }
        let last = catalog.columns.get(&qid("c3_q5")).unwrap();
        assert_eq!(last.selection, SelectionMode::Single);
    }

    #[test]
    fn builtin_owner_lookup_routes_by_block() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.owner_of(&qid("b1_q9_music_detail")), Some(Block::Childhood));
        assert_eq!(catalog.owner_of(&qid("process_hate")), Some(Block::Vocation));
        assert_eq!(catalog.owner_of(&qid("c2_q3")), Some(Block::Columns));
        assert_eq!(catalog.owner_of(&qid("nope")), None);
    }

    #[test]
    fn mini_catalog_applies_block_defaults() {
        let catalog = Catalog::from_yaml(MINI_B1, MINI_B2, MINI_B3).unwrap();
        let a1 = catalog.childhood.get(&qid("a1")).unwrap();
        assert_eq!(a1.selection, SelectionMode::Single);
        assert!(!a1.allows_free_text);
        assert!(a1.options[1].effect.is_empty());

        let c1 = catalog.columns.get(&qid("c1")).unwrap();
        assert_eq!(c1.selection, SelectionMode::Multiple);
        assert!(c1.allows_free_text);
        assert_eq!(c1.options[0].key.as_deref(), Some("deep"));
    }

    #[test]
    fn unknown_potential_fails_at_load() {
        let bad = MINI_B1.replace("Amber: 1", "SHUNGIT: 1");
        let err = Catalog::from_yaml(&bad, MINI_B2, MINI_B3).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { block: Block::Childhood, .. }));
    }

    #[test]
    fn fractional_delta_in_branching_block_is_rejected() {
        let bad = MINI_B1.replace("Amber: 1", "Amber: 1.5");
        let err = Catalog::from_yaml(&bad, MINI_B2, MINI_B3).unwrap_err();
        assert!(matches!(err, CatalogError::NonIntegerDelta { .. }));
    }

    #[test]
    fn missing_follow_up_target_is_fatal() {
        let bad = MINI_B1.replace("[a_detail]", "[a_missing]");
        let err = Catalog::from_yaml(&bad, MINI_B2, MINI_B3).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownFollowUp { .. }));
    }

    #[test]
    fn column_question_without_group_is_rejected() {
        let bad = MINI_B3.replace("    group: perception\n", "");
        let err = Catalog::from_yaml(MINI_B1, MINI_B2, &bad).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuestion { .. }));
    }

    #[test]
    fn ids_must_be_unique_across_blocks() {
        let clash = MINI_B3.replace("id: c1", "id: v1");
        let err = Catalog::from_yaml(MINI_B1, MINI_B2, &clash).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateQuestion("v1".into()));
    }

    #[test]
    fn from_dir_reads_three_files() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("block1.yaml"), MINI_B1).unwrap();
        std::fs::write(dir.path().join("block2.yaml"), MINI_B2).unwrap();
        std::fs::write(dir.path().join("block3.yaml"), MINI_B3).unwrap();

        let catalog = Catalog::from_dir(dir.path()).unwrap();
        assert_eq!(catalog.childhood.sequence(), &[qid("a1"), qid("a2")]);
    }

    #[test]
    fn from_dir_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Catalog::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
