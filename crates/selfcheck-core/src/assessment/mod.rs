//! Questionnaire scoring: catalog model, answers, per-question scoring, weighted
//! aggregation into a ranked report, and the session that sequences questions.

pub mod answers;
pub mod domain;
pub mod import;
pub mod report;
pub mod scoring;
pub mod session;

pub use answers::{Answer, AnswerSheet};
pub use domain::{
    AnswerOption, Catalog, CatalogMeta, Dimension, DimensionCatalog, Question, QuestionKind,
    Rubric, RubricItem,
};
pub use import::{AnswerFormat, AnswerImportError, AnswerImporter, CatalogError, CatalogLoader};
pub use report::{
    build_report, DimensionFeedback, DimensionRow, DimensionSummary, LevelTag,
    OpenAnswerDetail, OpenAnswerReview, Report, ReportFeedback, ReportMeta,
};
pub use scoring::{normalize_text, score_question, RubricHit, ScoreDetails, ScoreResult};
pub use session::{
    working_questions, AssessmentSession, SessionError, SessionOptions, SessionStep,
};
