//! Structured input for drafting a narrative report.
//!
//! Drafting itself happens elsewhere; this module only lays a finished
//! record out in a stable, lossless shape: potential descriptions, the three
//! score tables, per-block rankings and the rendered text logs.

use serde::{Deserialize, Serialize};

use super::record::SessionRecord;
use crate::domain::foundation::{Potential, SubjectName, Timestamp};
use crate::domain::questionnaire::{ColumnSheet, ScoreSheet, TextLogEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialDescription {
    pub potential: Potential,
    pub description: String,
}

/// Potentials ordered by descending score, one list per block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    pub childhood: Vec<Potential>,
    pub vocation: Vec<Potential>,
    /// Ranked by the sum of the three columns.
    pub columns: Vec<Potential>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInput {
    pub subject: SubjectName,
    pub finalized_at: Timestamp,
    pub potentials: Vec<PotentialDescription>,
    pub childhood_scores: ScoreSheet<i32>,
    pub vocation_scores: ScoreSheet<f64>,
    pub column_scores: ColumnSheet,
    pub column_totals: ScoreSheet<f64>,
    pub rankings: Rankings,
    pub vocation_log: Vec<String>,
    pub columns_log: Vec<String>,
}

impl ReportInput {
    pub fn from_record(record: &SessionRecord) -> Self {
        let column_totals = record.columns.scores.totals();
        Self {
            subject: record.subject.clone(),
            finalized_at: record.finalized_at,
            potentials: Potential::ALL
                .iter()
                .map(|&potential| PotentialDescription {
                    potential,
                    description: potential.description().to_string(),
                })
                .collect(),
            childhood_scores: record.childhood.scores.clone(),
            vocation_scores: record.vocation.scores.clone(),
            column_scores: record.columns.scores.clone(),
            rankings: Rankings {
                childhood: record.childhood.scores.ranking(),
                vocation: record.vocation.scores.ranking(),
                columns: column_totals.ranking(),
            },
            column_totals,
            vocation_log: render_log(&record.vocation.text_log),
            columns_log: render_log(&record.columns.text_log),
        }
    }

    /// Plain-text rendering of the whole input, section by section.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Potentials:\n");
        for entry in &self.potentials {
            out.push_str(&format!("- {}: {}\n", entry.potential, entry.description));
        }

        out.push_str("\nBlock 1 scores (childhood):\n");
        for (potential, score) in self.childhood_scores.iter() {
            out.push_str(&format!("- {}: {}\n", potential, score));
        }

        out.push_str("\nBlock 2 scores (vocation):\n");
        for (potential, score) in self.vocation_scores.iter() {
            out.push_str(&format!("- {}: {:.2}\n", potential, score));
        }

        out.push_str("\nBlock 3 scores (perception / process / result / total):\n");
        for (potential, tally) in self.column_scores.iter() {
            out.push_str(&format!(
                "- {}: {} / {} / {} / {}\n",
                potential,
                tally.perception,
                tally.process,
                tally.result,
                tally.total()
            ));
        }

        out.push_str("\nBlock 2 text answers:\n");
        push_log(&mut out, &self.vocation_log);
        out.push_str("\nBlock 3 text answers:\n");
        push_log(&mut out, &self.columns_log);
        out
    }
}

fn render_log(entries: &[TextLogEntry]) -> Vec<String> {
    entries.iter().map(TextLogEntry::render).collect()
}

fn push_log(out: &mut String, log: &[String]) {
    if log.is_empty() {
        out.push_str("(none)\n");
        return;
    }
    out.push_str(&log.join("\n\n"));
    out.push('\n');
}
