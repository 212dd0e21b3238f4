use super::super::domain::DimensionCatalog;
use super::views::{
    DimensionFeedback, DimensionRow, DimensionSummary, LevelTag, OpenAnswerReview, Report,
    ReportFeedback,
};

const RECOMMENDATIONS_PER_DIMENSION: usize = 3;
const DIGEST_SIZE: usize = 2;
const NO_NEXT_STEP: &str = "—";
const NO_RUBRIC_HIT_HINT: &str =
    "The rubric found no key elements. Mention money, risk, timing and the next step.";

fn dimension_feedback(summary: &DimensionSummary) -> DimensionFeedback {
    let tag = summary.tag();
    DimensionFeedback {
        key: summary.key.clone(),
        name: summary.name.clone(),
        why: summary.why.clone(),
        percent: summary.percent,
        tag,
        tag_label: tag.label(),
        recommendations: summary
            .do_next
            .iter()
            .take(RECOMMENDATIONS_PER_DIMENSION)
            .cloned()
            .collect(),
    }
}

pub(crate) fn generate_feedback(
    report: &Report,
    dimensions: &DimensionCatalog,
    size: usize,
) -> ReportFeedback {
    let strengths = report
        .top(size)
        .into_iter()
        .map(dimension_feedback)
        .collect();
    let improvements = report
        .bottom(size)
        .into_iter()
        .map(dimension_feedback)
        .collect();

    let table = report
        .dimensions
        .iter()
        .map(|summary| DimensionRow {
            name: summary.name.clone(),
            percent: summary.percent,
            tag_label: summary.tag().label(),
            next_step: summary
                .do_next
                .first()
                .cloned()
                .unwrap_or_else(|| NO_NEXT_STEP.to_string()),
        })
        .collect();

    let open_reviews = report
        .open_answers
        .iter()
        .map(|detail| {
            let percent = detail.percent();
            let credited: Vec<String> = detail
                .found
                .iter()
                .map(|hit| format!("{} (+{})", hit.label, hit.points))
                .collect();
            let hint = credited
                .is_empty()
                .then(|| NO_RUBRIC_HIT_HINT.to_string());

            OpenAnswerReview {
                id: detail.id.clone(),
                dimension_name: dimensions
                    .get(&detail.dimension)
                    .map(|dimension| dimension.name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| detail.dimension.clone()),
                question: detail.question.clone(),
                answer: detail.answer.clone(),
                score: detail.score,
                max_score: detail.max_score,
                percent,
                tag: LevelTag::from_percent(percent),
                weight: detail.weight,
                credited,
                hint,
            }
        })
        .collect();

    ReportFeedback {
        overall_percent: report.overall_percent,
        overall_tag: report.overall_tag(),
        strengths,
        improvements,
        table,
        open_reviews,
    }
}

fn listing(summaries: &[&DimensionSummary]) -> String {
    summaries
        .iter()
        .map(|summary| format!("{} ({}%)", summary.name, summary.percent))
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn generate_digest(report: &Report) -> String {
    let title = if report.meta.title.is_empty() {
        "Assessment"
    } else {
        report.meta.title.as_str()
    };

    let mut lines = vec![format!("{title}: overall {}%", report.overall_percent)];

    let top = report.top(DIGEST_SIZE);
    if !top.is_empty() {
        lines.push(format!("Strengths: {}", listing(&top)));
    }

    let low = report.bottom(DIGEST_SIZE);
    if !low.is_empty() {
        lines.push(format!("Improve: {}", listing(&low)));
    }

    lines.join("\n")
}
