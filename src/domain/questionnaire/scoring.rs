//! Scoring strategies and the score sheets they accumulate into.
//!
//! Two strategies exist:
//!
//! - [`AdditiveDeltas`] adds each selected option's per-potential delta
//!   (integer in Block 1, fractional and possibly negative in Block 2).
//! - [`GroupedTally`] adds `1.0` per listed potential into the column of the
//!   question's group (Block 3).
//!
//! Every strategy can retract what it applied, which is how re-answering a
//! question replaces its contribution instead of double counting.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

use crate::domain::catalog::{AnswerOption, Deltas, Group, Question};
use crate::domain::foundation::Potential;

/// Numeric domain of an additive score (`i32` or `f64`).
pub trait ScoreValue:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Add<Output = Self>
    + Sub<Output = Self>
    + Send
    + Sync
    + 'static
{
}

impl<T> ScoreValue for T where
    T: Copy
        + Default
        + PartialEq
        + PartialOrd
        + fmt::Debug
        + Serialize
        + DeserializeOwned
        + Add<Output = T>
        + Sub<Output = T>
        + Send
        + Sync
        + 'static
{
}

/// Whether an option's effect is being added or taken back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Apply,
    Retract,
}

/// How one selected option changes a block's score sheet.
pub trait ScoringRule {
    /// What an option carries (delta map, potential list...).
    type Effect: Clone + fmt::Debug + PartialEq + Send + Sync;
    /// Running scores of one block.
    type Sheet: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;

    /// A sheet with every potential at zero.
    fn empty_sheet() -> Self::Sheet;

    /// Adds (or retracts) the effect of `option`, chosen on `question`.
    fn apply(
        sheet: &mut Self::Sheet,
        question: &Question<Self::Effect>,
        option: &AnswerOption<Self::Effect>,
        direction: Direction,
    );
}

/// Additive delta-map scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditiveDeltas<N>(PhantomData<N>);

impl<N: ScoreValue> ScoringRule for AdditiveDeltas<N> {
    type Effect = Deltas<N>;
    type Sheet = ScoreSheet<N>;

    fn empty_sheet() -> Self::Sheet {
        ScoreSheet::new()
    }

    fn apply(
        sheet: &mut Self::Sheet,
        _question: &Question<Self::Effect>,
        option: &AnswerOption<Self::Effect>,
        direction: Direction,
    ) {
        for (&potential, &delta) in &option.effect {
            match direction {
                Direction::Apply => sheet.add(potential, delta),
                Direction::Retract => sheet.subtract(potential, delta),
            }
        }
    }
}

/// Flat per-group tally scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupedTally;

impl ScoringRule for GroupedTally {
    type Effect = Vec<Potential>;
    type Sheet = ColumnSheet;

    fn empty_sheet() -> Self::Sheet {
        ColumnSheet::new()
    }

    fn apply(
        sheet: &mut Self::Sheet,
        question: &Question<Self::Effect>,
        option: &AnswerOption<Self::Effect>,
        direction: Direction,
    ) {
        // Column questions always carry a group; the catalog rejects them otherwise.
        let Some(group) = question.group else {
            return;
        };
        let unit = match direction {
            Direction::Apply => 1.0,
            Direction::Retract => -1.0,
        };
        for &potential in &option.effect {
            sheet.add(potential, group, unit);
        }
    }
}

/// Running score per potential. Always lists all nine potentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSheet<N>(BTreeMap<Potential, N>);

impl<N: ScoreValue> ScoreSheet<N> {
    pub fn new() -> Self {
        Self(Potential::ALL.iter().map(|&p| (p, N::default())).collect())
    }

    pub fn get(&self, potential: Potential) -> N {
        self.0.get(&potential).copied().unwrap_or_default()
    }

    pub fn add(&mut self, potential: Potential, delta: N) {
        let entry = self.0.entry(potential).or_default();
        *entry = *entry + delta;
    }

    pub fn subtract(&mut self, potential: Potential, delta: N) {
        let entry = self.0.entry(potential).or_default();
        *entry = *entry - delta;
    }

    /// Scores in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Potential, N)> + '_ {
        Potential::ALL.iter().map(move |&p| (p, self.get(p)))
    }

    /// Potentials by descending score; ties keep registry order.
    pub fn ranking(&self) -> Vec<Potential> {
        let mut ranked: Vec<Potential> = Potential::ALL.to_vec();
        ranked.sort_by(|a, b| {
            self.get(*b)
                .partial_cmp(&self.get(*a))
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    pub fn as_map(&self) -> &BTreeMap<Potential, N> {
        &self.0
    }
}

impl<N: ScoreValue> Default for ScoreSheet<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tally of one potential across the three Block 3 columns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnTally {
    pub perception: f64,
    pub process: f64,
    pub result: f64,
}

impl ColumnTally {
    pub fn get(&self, group: Group) -> f64 {
        match group {
            Group::Perception => self.perception,
            Group::Process => self.process,
            Group::Result => self.result,
        }
    }

    pub fn add(&mut self, group: Group, value: f64) {
        match group {
            Group::Perception => self.perception += value,
            Group::Process => self.process += value,
            Group::Result => self.result += value,
        }
    }

    /// Sum of the three columns.
    pub fn total(&self) -> f64 {
        self.perception + self.process + self.result
    }
}

/// Per-potential column tallies of Block 3. Always lists all nine potentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSheet(BTreeMap<Potential, ColumnTally>);

impl ColumnSheet {
    pub fn new() -> Self {
        Self(
            Potential::ALL
                .iter()
                .map(|&p| (p, ColumnTally::default()))
                .collect(),
        )
    }

    pub fn tally(&self, potential: Potential) -> ColumnTally {
        self.0.get(&potential).copied().unwrap_or_default()
    }

    pub fn add(&mut self, potential: Potential, group: Group, value: f64) {
        self.0.entry(potential).or_default().add(group, value);
    }

    /// Tallies in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Potential, ColumnTally)> + '_ {
        Potential::ALL.iter().map(move |&p| (p, self.tally(p)))
    }

    /// Per-potential sum of the three columns.
    pub fn totals(&self) -> ScoreSheet<f64> {
        let mut totals = ScoreSheet::new();
        for (potential, tally) in self.iter() {
            totals.add(potential, tally.total());
        }
        totals
    }

    pub fn as_map(&self) -> &BTreeMap<Potential, ColumnTally> {
        &self.0
    }
}

impl Default for ColumnSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Block, QuestionId};

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn weighted_question() -> Question<Deltas<f64>> {
        Question::new(qid("v1"), Block::Vocation, "Pick")
            .with_option(AnswerOption::new(
                "A",
                Deltas::from([(Potential::Amethyst, 0.7)]),
            ))
            .with_option(AnswerOption::new(
                "B",
                Deltas::from([(Potential::Amethyst, 0.3), (Potential::Amber, -0.9)]),
            ))
    }

    fn column_question() -> Question<Vec<Potential>> {
        Question::new(qid("c1"), Block::Columns, "Wow")
            .with_group(Group::Perception)
            .with_option(AnswerOption::new(
                "Deep",
                vec![Potential::Amethyst, Potential::Sapphire],
            ))
            .with_option(AnswerOption::new("Other", vec![]))
    }

    #[test]
    fn sheets_start_with_all_nine_potentials_at_zero() {
        let sheet = ScoreSheet::<i32>::new();
        assert_eq!(sheet.as_map().len(), 9);
        assert!(sheet.iter().all(|(_, v)| v == 0));
        assert_eq!(ColumnSheet::new().as_map().len(), 9);
    }

    #[test]
    fn additive_deltas_sum_across_options() {
        let q = weighted_question();
        let mut sheet = AdditiveDeltas::<f64>::empty_sheet();
        AdditiveDeltas::<f64>::apply(&mut sheet, &q, &q.options[0], Direction::Apply);
        AdditiveDeltas::<f64>::apply(&mut sheet, &q, &q.options[1], Direction::Apply);

        assert!((sheet.get(Potential::Amethyst) - 1.0).abs() < 1e-9);
        assert!((sheet.get(Potential::Amber) + 0.9).abs() < 1e-9);
    }

    #[test]
    fn retract_undoes_apply() {
        let q = weighted_question();
        let mut sheet = AdditiveDeltas::<f64>::empty_sheet();
        AdditiveDeltas::<f64>::apply(&mut sheet, &q, &q.options[1], Direction::Apply);
        AdditiveDeltas::<f64>::apply(&mut sheet, &q, &q.options[1], Direction::Retract);

        assert!(sheet.iter().all(|(_, v)| v.abs() < 1e-9));
    }

    #[test]
    fn grouped_tally_only_touches_the_question_group() {
        let q = column_question();
        let mut sheet = GroupedTally::empty_sheet();
        GroupedTally::apply(&mut sheet, &q, &q.options[0], Direction::Apply);

        let amethyst = sheet.tally(Potential::Amethyst);
        assert_eq!(amethyst.perception, 1.0);
        assert_eq!(amethyst.process, 0.0);
        assert_eq!(amethyst.result, 0.0);
        assert_eq!(sheet.tally(Potential::Sapphire).perception, 1.0);
        assert_eq!(sheet.tally(Potential::Ruby).total(), 0.0);
    }

    #[test]
    fn empty_potential_list_contributes_nothing() {
        let q = column_question();
        let mut sheet = GroupedTally::empty_sheet();
        GroupedTally::apply(&mut sheet, &q, &q.options[1], Direction::Apply);
        assert_eq!(sheet, ColumnSheet::new());
    }

    #[test]
    fn ranking_is_descending_with_registry_tie_break() {
        let mut sheet = ScoreSheet::<i32>::new();
        sheet.add(Potential::Shungit, 3);
        sheet.add(Potential::Citrine, 3);
        sheet.add(Potential::Amber, 5);

        let ranking = sheet.ranking();
        assert_eq!(
            &ranking[..4],
            &[
                Potential::Amber,
                Potential::Citrine,
                Potential::Shungit,
                Potential::Amethyst
            ]
        );
    }

    #[test]
    fn column_totals_sum_the_three_columns() {
        let mut sheet = ColumnSheet::new();
        sheet.add(Potential::Garnet, Group::Perception, 1.0);
        sheet.add(Potential::Garnet, Group::Result, 2.0);
        assert_eq!(sheet.totals().get(Potential::Garnet), 3.0);
    }

    #[test]
    fn sheets_serialize_as_name_keyed_maps() {
        let mut sheet = ScoreSheet::<i32>::new();
        sheet.add(Potential::Ruby, 2);
        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["Ruby"], 2);
        assert_eq!(json["Amethyst"], 0);

        let columns = ColumnSheet::new();
        let json = serde_json::to_value(&columns).unwrap();
        assert_eq!(json["Emerald"]["process"], 0.0);
    }
}
