use crate::infra::{AppState, ReportEnvelope};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use selfcheck_core::assessment::{
    build_report, AnswerSheet, AssessmentSession, Catalog, CatalogLoader, Question, ReportMeta,
    SessionOptions,
};
use selfcheck_core::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionStartRequest {
    pub(crate) catalog: Catalog,
    #[serde(default)]
    pub(crate) shuffle: Option<bool>,
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionStartResponse {
    pub(crate) title: String,
    pub(crate) build: String,
    pub(crate) name: String,
    pub(crate) shuffled: bool,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportRequest {
    pub(crate) catalog: Catalog,
    #[serde(default)]
    pub(crate) answers: AnswerSheet,
    /// Working question list as returned by `session/start`; catalog order when absent.
    #[serde(default)]
    pub(crate) questions: Option<Vec<Question>>,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) shuffled: bool,
    #[serde(default)]
    pub(crate) started_at: Option<DateTime<Utc>>,
}

pub(crate) fn assessment_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/session/start", post(session_start_endpoint))
        .route("/api/v1/report", post(report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn session_start_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SessionStartRequest>,
) -> Result<Json<SessionStartResponse>, AppError> {
    let catalog = CatalogLoader::validate(payload.catalog)?;
    let shuffle = payload.shuffle.unwrap_or(state.assessment.shuffle);
    let name = payload.name.trim().to_string();
    let started_at = Utc::now();

    let session = AssessmentSession::start(
        &catalog,
        SessionOptions {
            respondent: name.clone(),
            shuffle,
        },
        started_at,
    );

    Ok(Json(SessionStartResponse {
        title: catalog.meta.title,
        build: catalog.meta.build,
        name,
        shuffled: shuffle,
        started_at,
        questions: session.questions().to_vec(),
    }))
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<ReportEnvelope>, AppError> {
    let ReportRequest {
        catalog,
        answers,
        questions,
        name,
        shuffled,
        started_at,
    } = payload;
    let catalog = CatalogLoader::validate(catalog)?;
    let questions = questions.unwrap_or_else(|| catalog.questions.clone());

    let meta = ReportMeta {
        title: catalog.meta.title.clone(),
        build: catalog.meta.build.clone(),
        started_at,
        finished_at: Utc::now(),
        name: name.trim().to_string(),
        shuffled,
        question_count: questions.len(),
    };
    let report = build_report(&questions, &answers, &catalog.dimensions, meta);
    info!(
        questions = questions.len(),
        answers = answers.len(),
        overall_percent = report.overall_percent,
        "report served"
    );

    Ok(Json(ReportEnvelope::new(
        report,
        &catalog.dimensions,
        state.assessment.feedback_size,
    )))
}
