mod aggregate;
mod builder;
mod feedback;
pub mod views;

pub use aggregate::{DimensionAggregator, WeightedTally};
pub use builder::build_report;
pub use views::{
    DimensionFeedback, DimensionRow, DimensionSummary, LevelTag, OpenAnswerDetail,
    OpenAnswerReview, Report, ReportFeedback, ReportMeta,
};

use super::domain::DimensionCatalog;

impl Report {
    /// Strengths, improvement areas, dimension table and open-answer reviews.
    pub fn feedback(&self, dimensions: &DimensionCatalog, size: usize) -> ReportFeedback {
        feedback::generate_feedback(self, dimensions, size)
    }

    /// Short plain-text summary listing the two strongest and two weakest dimensions.
    pub fn digest(&self) -> String {
        feedback::generate_digest(self)
    }
}
