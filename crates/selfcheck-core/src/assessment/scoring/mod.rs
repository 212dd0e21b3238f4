mod normalizer;
mod rules;

pub use normalizer::normalize_text;

use super::answers::Answer;
use super::domain::{Question, QuestionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rubric item credited for an open answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricHit {
    pub label: String,
    pub points: f64,
}

/// Supporting data for open answers and diagnostics for degenerate results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub found: Vec<RubricHit>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Outcome of scoring one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub points: f64,
    pub max_points: f64,
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ScoreDetails>,
}

impl ScoreResult {
    /// Skipped questions still count with a nominal maximum of one.
    pub fn skipped() -> Self {
        Self {
            points: 0.0,
            max_points: 1.0,
            skipped: true,
            details: None,
        }
    }

    pub(crate) fn answered(points: f64, max_points: f64) -> Self {
        Self {
            points,
            max_points,
            skipped: false,
            details: None,
        }
    }

    pub(crate) fn degenerate(note: &str) -> Self {
        Self {
            points: 0.0,
            max_points: 1.0,
            skipped: false,
            details: Some(ScoreDetails {
                note: note.to_string(),
                ..ScoreDetails::default()
            }),
        }
    }

    /// `points / max_points`, or zero when there is no positive maximum.
    pub fn ratio(&self) -> f64 {
        if self.max_points > 0.0 {
            self.points / self.max_points
        } else {
            0.0
        }
    }

    pub fn found(&self) -> &[RubricHit] {
        self.details
            .as_ref()
            .map(|details| details.found.as_slice())
            .unwrap_or(&[])
    }
}

/// Scores one question in isolation.
///
/// A payload that does not match the question's kind is treated as an empty
/// payload of that kind: no choice, no selection, a zero scale value, or empty text.
pub fn score_question(question: &Question, answer: &Answer) -> ScoreResult {
    if answer.is_skipped() {
        return ScoreResult::skipped();
    }

    match &question.kind {
        QuestionKind::Single { options } => {
            let choice = match answer {
                Answer::Single(index) => Some(*index),
                _ => None,
            };
            rules::score_single(options, choice)
        }
        QuestionKind::Multi {
            options,
            multi_max_score,
        } => {
            let empty = BTreeSet::new();
            let choices = match answer {
                Answer::Multi(indices) => indices,
                _ => &empty,
            };
            rules::score_multi(options, choices, *multi_max_score)
        }
        QuestionKind::Likert => {
            let value = match answer {
                Answer::Likert(value) => *value,
                _ => 0.0,
            };
            rules::score_likert(value)
        }
        QuestionKind::Open { rubric } => {
            let text = match answer {
                Answer::Open(text) => text.as_str(),
                _ => "",
            };
            rules::score_open(rubric.as_ref(), text)
        }
        QuestionKind::Unknown => ScoreResult::degenerate(rules::UNKNOWN_TYPE_NOTE),
    }
}
