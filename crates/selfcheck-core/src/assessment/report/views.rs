use super::super::scoring::RubricHit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Qualitative band shown next to a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTag {
    Strong,
    Adequate,
    NeedsWork,
}

impl LevelTag {
    pub const fn from_percent(percent: u8) -> Self {
        if percent >= 80 {
            Self::Strong
        } else if percent >= 60 {
            Self::Adequate
        } else {
            Self::NeedsWork
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Adequate => "adequate",
            Self::NeedsWork => "needs work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub title: String,
    pub build: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: DateTime<Utc>,
    pub name: String,
    pub shuffled: bool,
    pub question_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSummary {
    pub key: String,
    pub name: String,
    pub percent: u8,
    pub why: String,
    pub do_next: Vec<String>,
}

impl DimensionSummary {
    pub fn tag(&self) -> LevelTag {
        LevelTag::from_percent(self.percent)
    }
}

/// Open answer as scored, kept for the review section of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAnswerDetail {
    pub id: String,
    pub dimension: String,
    pub question: String,
    pub answer: String,
    pub score: f64,
    pub max_score: f64,
    pub found: Vec<RubricHit>,
    pub note: String,
    pub weight: f64,
}

impl OpenAnswerDetail {
    pub fn percent(&self) -> u8 {
        if self.max_score > 0.0 {
            super::aggregate::ratio_percent(self.score / self.max_score)
        } else {
            0
        }
    }
}

/// Finished report; dimensions are ranked by descending percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub meta: ReportMeta,
    pub overall_percent: u8,
    pub dimensions: Vec<DimensionSummary>,
    pub open_answers: Vec<OpenAnswerDetail>,
}

impl Report {
    pub fn overall_tag(&self) -> LevelTag {
        LevelTag::from_percent(self.overall_percent)
    }

    /// Highest-ranked dimensions, in ranking order.
    pub fn top(&self, count: usize) -> Vec<&DimensionSummary> {
        self.dimensions.iter().take(count).collect()
    }

    /// Lowest dimensions, ascending; ties keep their ranking order.
    pub fn bottom(&self, count: usize) -> Vec<&DimensionSummary> {
        let mut ascending: Vec<&DimensionSummary> = self.dimensions.iter().collect();
        ascending.sort_by_key(|summary| summary.percent);
        ascending.truncate(count);
        ascending
    }

    pub fn dimension(&self, key: &str) -> Option<&DimensionSummary> {
        self.dimensions.iter().find(|summary| summary.key == key)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionFeedback {
    pub key: String,
    pub name: String,
    pub why: String,
    pub percent: u8,
    pub tag: LevelTag,
    pub tag_label: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRow {
    pub name: String,
    pub percent: u8,
    pub tag_label: &'static str,
    pub next_step: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAnswerReview {
    pub id: String,
    pub dimension_name: String,
    pub question: String,
    pub answer: String,
    pub score: f64,
    pub max_score: f64,
    pub percent: u8,
    pub tag: LevelTag,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credited: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Presentation-ready reading of a report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFeedback {
    pub overall_percent: u8,
    pub overall_tag: LevelTag,
    pub strengths: Vec<DimensionFeedback>,
    pub improvements: Vec<DimensionFeedback>,
    pub table: Vec<DimensionRow>,
    pub open_reviews: Vec<OpenAnswerReview>,
}
