use super::super::answers::{Answer, AnswerSheet};
use super::super::domain::{DimensionCatalog, Question, QuestionKind};
use super::super::scoring::{score_question, ScoreResult};
use super::aggregate::{DimensionAggregator, WeightedTally};
use super::views::{DimensionSummary, OpenAnswerDetail, Report, ReportMeta};
use tracing::debug;

/// Scores `questions` in the given order and assembles a report.
///
/// `meta.question_count` is overwritten with the number of questions scored.
pub fn build_report(
    questions: &[Question],
    answers: &AnswerSheet,
    dimensions: &DimensionCatalog,
    mut meta: ReportMeta,
) -> Report {
    let mut overall = WeightedTally::default();
    let mut per_dimension = DimensionAggregator::new();
    let mut open_answers = Vec::new();

    for question in questions {
        let answer = answers.resolve(&question.id);
        let score = score_question(question, answer);

        overall.add(&score, question.weight);
        per_dimension.add(&question.dimension, &score, question.weight);

        if let QuestionKind::Open { .. } = question.kind {
            open_answers.push(open_answer_detail(question, answer, &score));
        }
    }

    let mut ranked: Vec<DimensionSummary> = per_dimension
        .iter()
        .map(|(key, tally)| dimension_summary(key, tally, dimensions))
        .collect();
    ranked.sort_by(|left, right| right.percent.cmp(&left.percent));

    meta.question_count = questions.len();
    let overall_percent = overall.percent();

    debug!(
        questions = questions.len(),
        dimensions = ranked.len(),
        overall_percent,
        "report built"
    );

    Report {
        meta,
        overall_percent,
        dimensions: ranked,
        open_answers,
    }
}

fn dimension_summary(
    key: &str,
    tally: &WeightedTally,
    dimensions: &DimensionCatalog,
) -> DimensionSummary {
    let dimension = dimensions.get(key);
    DimensionSummary {
        key: key.to_string(),
        name: dimension
            .map(|dimension| dimension.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| key.to_string()),
        percent: tally.percent(),
        why: dimension
            .map(|dimension| dimension.why.clone())
            .unwrap_or_default(),
        do_next: dimension
            .map(|dimension| dimension.do_next.clone())
            .unwrap_or_default(),
    }
}

fn open_answer_detail(
    question: &Question,
    answer: &Answer,
    score: &ScoreResult,
) -> OpenAnswerDetail {
    let text = match answer {
        Answer::Open(text) => text.clone(),
        _ => String::new(),
    };
    let (found, note) = score
        .details
        .as_ref()
        .map(|details| (details.found.clone(), details.note.clone()))
        .unwrap_or_default();

    OpenAnswerDetail {
        id: question.id.clone(),
        dimension: question.dimension.clone(),
        question: question.text.clone(),
        answer: text,
        score: score.points,
        max_score: score.max_points,
        found,
        note,
        weight: question.weight,
    }
}
