use crate::infra::ReportEnvelope;
use chrono::Utc;
use clap::{Args, ValueEnum};
use selfcheck_core::assessment::{
    build_report, AnswerImporter, AssessmentSession, CatalogLoader, DimensionFeedback, Question,
    QuestionKind, ReportMeta, SessionOptions,
};
use selfcheck_core::config::AppConfig;
use selfcheck_core::error::AppError;
use selfcheck_core::telemetry::{self, LogSink};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct StartArgs {
    /// Questionnaire catalog (JSON)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Keep catalog order for questions and options
    #[arg(long)]
    pub(crate) no_shuffle: bool,
    /// Respondent name recorded on the session
    #[arg(long)]
    pub(crate) name: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Questionnaire catalog (JSON)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Answers keyed by question id (.json) or `question_id,answer` rows (.csv)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Respondent name shown in the report header
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Output layout
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub(crate) format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    Text,
    Json,
    Digest,
}

fn command_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    Ok(config)
}

pub(crate) fn run_start(args: StartArgs) -> Result<(), AppError> {
    let config = command_config()?;
    let catalog = CatalogLoader::from_path(&args.catalog)?;
    let options = SessionOptions {
        respondent: args.name.unwrap_or_default(),
        shuffle: config.assessment.shuffle && !args.no_shuffle,
    };
    let shuffled = options.shuffle;
    let session = AssessmentSession::start(&catalog, options, Utc::now());

    print!(
        "{}",
        render_question_list(&catalog.meta.title, session.questions(), shuffled)
    );
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = command_config()?;
    let catalog = CatalogLoader::from_path(&args.catalog)?;
    let answers = AnswerImporter::from_path(&args.answers, &catalog)?;
    info!(
        answers = answers.len(),
        path = %args.answers.display(),
        "answers imported"
    );

    let meta = ReportMeta {
        title: catalog.meta.title.clone(),
        build: catalog.meta.build.clone(),
        started_at: None,
        finished_at: Utc::now(),
        name: args.name.map(|name| name.trim().to_string()).unwrap_or_default(),
        shuffled: false,
        question_count: catalog.questions.len(),
    };
    let report = build_report(&catalog.questions, &answers, &catalog.dimensions, meta);
    let envelope = ReportEnvelope::new(
        report,
        &catalog.dimensions,
        config.assessment.feedback_size,
    );

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&envelope)?),
        ReportFormat::Digest => println!("{}", envelope.digest),
        ReportFormat::Text => print!("{}", render_report(&envelope)),
    }
    Ok(())
}

pub(crate) fn render_question_list(title: &str, questions: &[Question], shuffled: bool) -> String {
    let mut out = String::new();
    let order = if shuffled { "shuffled" } else { "catalog order" };
    let _ = writeln!(out, "{title}: {} questions ({order})", questions.len());

    for (position, question) in questions.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}. [{}] {} ({}, weight {})",
            position + 1,
            question.dimension,
            question.text,
            question.kind.label(),
            question.weight
        );
        if !question.hint.is_empty() {
            let _ = writeln!(out, "   {}", question.hint);
        }
        match &question.kind {
            QuestionKind::Single { options } | QuestionKind::Multi { options, .. } => {
                for (index, option) in options.iter().enumerate() {
                    let _ = writeln!(out, "   {index}) {}", option.text);
                }
            }
            QuestionKind::Likert => {
                let _ = writeln!(out, "   scale 0..5");
            }
            QuestionKind::Open { .. } | QuestionKind::Unknown => {}
        }
    }

    out
}

pub(crate) fn render_report(envelope: &ReportEnvelope) -> String {
    let ReportEnvelope {
        report, feedback, ..
    } = envelope;
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading(&report.meta.title, &report.meta.build));
    if !report.meta.name.is_empty() {
        let _ = writeln!(out, "Respondent: {}", report.meta.name);
    }
    let _ = writeln!(
        out,
        "Finished: {}",
        report.meta.finished_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "Overall: {}% ({}) across {} questions",
        feedback.overall_percent,
        feedback.overall_tag.label(),
        report.meta.question_count
    );

    let _ = writeln!(out, "\nDimensions");
    for row in &feedback.table {
        let _ = writeln!(
            out,
            "- {}: {}% ({}) | next: {}",
            row.name, row.percent, row.tag_label, row.next_step
        );
    }

    render_dimension_feedback(&mut out, "Strengths", &feedback.strengths);
    render_dimension_feedback(&mut out, "Improve", &feedback.improvements);

    if !feedback.open_reviews.is_empty() {
        let _ = writeln!(out, "\nOpen answers");
        for review in &feedback.open_reviews {
            let _ = writeln!(
                out,
                "- {} [{}]: {}/{} ({}%)",
                review.id, review.dimension_name, review.score, review.max_score, review.percent
            );
            if !review.credited.is_empty() {
                let _ = writeln!(out, "  credited: {}", review.credited.join(", "));
            }
            if let Some(hint) = &review.hint {
                let _ = writeln!(out, "  {hint}");
            }
        }
    }

    out
}

fn heading(title: &str, build: &str) -> String {
    let title = if title.is_empty() { "Assessment" } else { title };
    if build.is_empty() {
        title.to_string()
    } else {
        format!("{title} ({build})")
    }
}

fn render_dimension_feedback(out: &mut String, label: &str, entries: &[DimensionFeedback]) {
    if entries.is_empty() {
        return;
    }

    let _ = writeln!(out, "\n{label}");
    for entry in entries {
        let _ = writeln!(out, "- {} ({}%, {})", entry.name, entry.percent, entry.tag_label);
        if !entry.why.is_empty() {
            let _ = writeln!(out, "  {}", entry.why);
        }
        for step in &entry.recommendations {
            let _ = writeln!(out, "  * {step}");
        }
    }
}
