mod parser;

use super::answers::AnswerSheet;
use super::domain::Catalog;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Failure to read a questionnaire catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate question id {0}")]
    DuplicateQuestion(String),
}

/// Failure to read a respondent's answers.
#[derive(Debug, thiserror::Error)]
pub enum AnswerImportError {
    #[error("failed to read answers: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answers JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid answers CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: answer for question {question_id} is invalid: {reason}")]
    InvalidCell {
        line: u64,
        question_id: String,
        reason: String,
    },
}

pub struct CatalogLoader;

impl CatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        Self::validate(catalog)
    }

    /// Checks an already deserialized catalog, e.g. one embedded in a request body.
    pub fn validate(catalog: Catalog) -> Result<Catalog, CatalogError> {
        let mut seen = HashSet::new();
        for question in &catalog.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }
        }

        debug!(
            questions = catalog.questions.len(),
            dimensions = catalog.dimensions.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

/// Supported answer file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFormat {
    Json,
    Csv,
}

impl AnswerFormat {
    /// `.csv` files are read as CSV, everything else as JSON.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

pub struct AnswerImporter;

impl AnswerImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &Catalog,
    ) -> Result<AnswerSheet, AnswerImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        match AnswerFormat::for_path(path) {
            AnswerFormat::Json => Self::from_json_reader(file),
            AnswerFormat::Csv => Self::from_csv_reader(file, catalog),
        }
    }

    /// Reads a `{question_id: answer}` map in the interchange shape.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<AnswerSheet, AnswerImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads `question_id,answer` rows, interpreting each cell by the question's kind.
    ///
    /// Rows for ids missing from the catalog are ignored; a later row for the same
    /// question replaces an earlier one.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        catalog: &Catalog,
    ) -> Result<AnswerSheet, AnswerImportError> {
        let mut sheet = AnswerSheet::new();

        for record in parser::parse_records(reader)? {
            let Some(question) = catalog.question(&record.question_id) else {
                warn!(
                    question = %record.question_id,
                    line = record.line,
                    "answer for unknown question ignored"
                );
                continue;
            };

            let answer = parser::parse_cell(&question.kind, record.cell.as_deref()).map_err(
                |reason| AnswerImportError::InvalidCell {
                    line: record.line,
                    question_id: record.question_id.clone(),
                    reason: reason.0,
                },
            )?;
            sheet.record(record.question_id, answer);
        }

        Ok(sheet)
    }
}
