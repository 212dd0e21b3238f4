use super::super::domain::{AnswerOption, Rubric};
use super::normalizer::normalize_text;
use super::{RubricHit, ScoreDetails, ScoreResult};
use std::collections::BTreeSet;

/// Cap used for a single-choice question whose options all score zero.
///
/// Compatibility floor: it only keeps the ratio defined and carries no scoring intent.
pub(crate) const SINGLE_ZERO_MAX_FALLBACK: f64 = 5.0;
pub(crate) const LIKERT_MAX: f64 = 5.0;

pub(crate) const NO_RUBRIC_NOTE: &str = "no rubric configured for open question";
pub(crate) const UNKNOWN_TYPE_NOTE: &str = "unknown question type";

/// Bounds `value` by `max` first and then by `min`, so an inverted range yields `min`.
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

fn option_score(options: &[AnswerOption], index: i64) -> f64 {
    usize::try_from(index)
        .ok()
        .and_then(|index| options.get(index))
        .map(|option| option.score)
        .unwrap_or(0.0)
}

pub(crate) fn score_single(options: &[AnswerOption], choice: Option<i64>) -> ScoreResult {
    let best = options
        .iter()
        .map(|option| option.score)
        .fold(0.0_f64, f64::max);
    let max_points = if best == 0.0 {
        SINGLE_ZERO_MAX_FALLBACK
    } else {
        best
    };
    let points = choice
        .map(|index| option_score(options, index))
        .unwrap_or(0.0);

    ScoreResult::answered(clamp(points, 0.0, max_points), max_points)
}

pub(crate) fn score_multi(
    options: &[AnswerOption],
    choices: &BTreeSet<i64>,
    multi_max_score: Option<f64>,
) -> ScoreResult {
    let total: f64 = choices
        .iter()
        .map(|&index| option_score(options, index))
        .sum();
    let max_points = multi_max_score.unwrap_or(total);

    ScoreResult::answered(clamp(total, 0.0, max_points), max_points)
}

pub(crate) fn score_likert(value: f64) -> ScoreResult {
    ScoreResult::answered(clamp(value, 0.0, LIKERT_MAX), LIKERT_MAX)
}

pub(crate) fn score_open(rubric: Option<&Rubric>, text: &str) -> ScoreResult {
    let Some(rubric) = rubric else {
        return ScoreResult::degenerate(NO_RUBRIC_NOTE);
    };
    let Some(items) = rubric.items.as_deref() else {
        return ScoreResult::degenerate(NO_RUBRIC_NOTE);
    };

    let normalized = normalize_text(text);
    let mut found = Vec::new();
    let mut total = 0.0;

    for item in items {
        // A keyword that normalizes to nothing matches any text.
        let fired = item
            .keywords
            .iter()
            .any(|keyword| normalized.contains(&normalize_text(keyword)));

        if fired {
            total += item.points;
            found.push(RubricHit {
                label: item.label.clone(),
                points: item.points,
            });
        }
    }

    let max_points = rubric.effective_max_points();
    ScoreResult {
        points: clamp(total, 0.0, max_points),
        max_points,
        skipped: false,
        details: Some(ScoreDetails {
            found,
            text: text.to_string(),
            note: rubric.note.clone().unwrap_or_default(),
        }),
    }
}
