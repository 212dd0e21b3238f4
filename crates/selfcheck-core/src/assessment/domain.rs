use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_weight() -> f64 {
    1.0
}

/// Immutable catalog entry presented to the respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub dimension: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub text: String,
    #[serde(default)]
    pub hint: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn options(&self) -> Option<&[AnswerOption]> {
        match &self.kind {
            QuestionKind::Single { options } | QuestionKind::Multi { options, .. } => {
                Some(options)
            }
            QuestionKind::Likert | QuestionKind::Open { .. } | QuestionKind::Unknown => None,
        }
    }

    pub(crate) fn options_mut(&mut self) -> Option<&mut Vec<AnswerOption>> {
        match &mut self.kind {
            QuestionKind::Single { options } | QuestionKind::Multi { options, .. } => {
                Some(options)
            }
            QuestionKind::Likert | QuestionKind::Open { .. } | QuestionKind::Unknown => None,
        }
    }
}

/// Type-specific payload of a question, tagged by `type` in catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Single {
        options: Vec<AnswerOption>,
    },
    Multi {
        options: Vec<AnswerOption>,
        #[serde(
            rename = "multiMaxScore",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        multi_max_score: Option<f64>,
    },
    Likert,
    Open {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rubric: Option<Rubric>,
    },
    /// Placeholder for a `type` this engine does not recognise; scored as zero.
    #[serde(other)]
    Unknown,
}

impl QuestionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Single { .. } => "single",
            Self::Multi { .. } => "multi",
            Self::Likert => "likert",
            Self::Open { .. } => "open",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub score: f64,
}

/// Keyword rules applied to free-text answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    /// Absent items leave the question unscorable, unlike an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RubricItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Rubric {
    pub const DEFAULT_MAX_POINTS: f64 = 10.0;

    /// Cap applied to the summed item points; unset or zero falls back to 10.
    pub fn effective_max_points(&self) -> f64 {
        match self.max_points {
            Some(max) if max != 0.0 => max,
            _ => Self::DEFAULT_MAX_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricItem {
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub points: f64,
}

/// Competency axis the questions are grouped under.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub name: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub do_next: Vec<String>,
}

pub type DimensionCatalog = HashMap<String, Dimension>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub build: String,
}

/// Externally supplied questionnaire: metadata, dimensions and questions in canonical order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub meta: CatalogMeta,
    #[serde(default)]
    pub dimensions: DimensionCatalog,
    pub questions: Vec<Question>,
}

impl Catalog {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }
}
