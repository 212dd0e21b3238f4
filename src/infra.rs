use metrics_exporter_prometheus::PrometheusHandle;
use selfcheck_core::assessment::{DimensionCatalog, Report, ReportFeedback};
use selfcheck_core::config::AssessmentConfig;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) assessment: AssessmentConfig,
}

/// Report plus the feedback and digest derived from it.
#[derive(Debug, Serialize)]
pub(crate) struct ReportEnvelope {
    pub(crate) report: Report,
    pub(crate) feedback: ReportFeedback,
    pub(crate) digest: String,
}

impl ReportEnvelope {
    pub(crate) fn new(report: Report, dimensions: &DimensionCatalog, feedback_size: usize) -> Self {
        let feedback = report.feedback(dimensions, feedback_size);
        let digest = report.digest();
        Self {
            report,
            feedback,
            digest,
        }
    }
}
