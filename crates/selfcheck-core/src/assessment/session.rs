use super::answers::{Answer, AnswerSheet};
use super::domain::{Catalog, CatalogMeta, DimensionCatalog, Question};
use super::report::{build_report, Report, ReportMeta};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

/// Working copy of the catalog's questions, in presentation order.
///
/// With `shuffle` the question order and, independently, each choice question's
/// option order are uniformly permuted; the catalog itself is never touched.
pub fn working_questions<R: Rng + ?Sized>(
    catalog: &[Question],
    shuffle: bool,
    rng: &mut R,
) -> Vec<Question> {
    let mut questions = catalog.to_vec();
    if shuffle {
        questions.shuffle(rng);
        for question in &mut questions {
            if let Some(options) = question.options_mut() {
                options.shuffle(rng);
            }
        }
    }
    questions
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub respondent: String,
    pub shuffle: bool,
}

/// Where the session stands after a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Question(usize),
    Finished,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("question {question_id} needs an answer or an explicit skip")]
    EmptyAnswer { question_id: String },
    #[error("question {question_id} expects a {expected} answer")]
    AnswerKindMismatch {
        question_id: String,
        expected: &'static str,
    },
    #[error("all questions have already been answered")]
    Finished,
}

/// One respondent's pass through a catalog.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    meta: CatalogMeta,
    dimensions: DimensionCatalog,
    questions: Vec<Question>,
    answers: AnswerSheet,
    position: usize,
    respondent: String,
    shuffled: bool,
    started_at: DateTime<Utc>,
}

impl AssessmentSession {
    pub fn start(catalog: &Catalog, options: SessionOptions, started_at: DateTime<Utc>) -> Self {
        Self::start_with_rng(catalog, options, started_at, &mut rand::rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        catalog: &Catalog,
        options: SessionOptions,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let questions = working_questions(&catalog.questions, options.shuffle, rng);
        info!(
            questions = questions.len(),
            shuffled = options.shuffle,
            title = %catalog.meta.title,
            "assessment session started"
        );

        Self {
            meta: catalog.meta.clone(),
            dimensions: catalog.dimensions.clone(),
            questions,
            answers: AnswerSheet::new(),
            position: 0,
            respondent: options.respondent.trim().to_string(),
            shuffled: options.shuffle,
            started_at,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn dimensions(&self) -> &DimensionCatalog {
        &self.dimensions
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.questions.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    /// Stored answer for the question, used to restore a previously given input.
    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Records a non-empty answer for the current question and moves forward.
    pub fn submit(&mut self, answer: Answer) -> Result<SessionStep, SessionError> {
        let question = self.current().ok_or(SessionError::Finished)?;
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer {
                question_id: question.id.clone(),
            });
        }
        if !answer.fits(&question.kind) {
            return Err(SessionError::AnswerKindMismatch {
                question_id: question.id.clone(),
                expected: question.kind.label(),
            });
        }

        let question_id = question.id.clone();
        debug!(question = %question_id, position = self.position, "answer recorded");
        self.answers.record(question_id, answer.trimmed());
        Ok(self.advance())
    }

    /// Marks the current question as skipped and moves forward.
    pub fn skip(&mut self) -> Result<SessionStep, SessionError> {
        let question_id = self.current().ok_or(SessionError::Finished)?.id.clone();
        debug!(question = %question_id, position = self.position, "question skipped");
        self.answers.record(question_id, Answer::Skipped);
        Ok(self.advance())
    }

    /// Moves back one question, keeping `draft` for the current one when it carries input.
    pub fn back(&mut self, draft: Option<Answer>) -> usize {
        if let (Some(question), Some(draft)) = (self.questions.get(self.position), draft) {
            if !draft.is_empty() && draft.fits(&question.kind) {
                self.answers.record(question.id.clone(), draft.trimmed());
            }
        }

        let last = self.questions.len().saturating_sub(1);
        self.position = self.position.saturating_sub(1).min(last);
        self.position
    }

    /// Clears answers and returns to the first question, keeping the working order.
    pub fn restart(&mut self, started_at: DateTime<Utc>) {
        self.answers.clear();
        self.position = 0;
        self.started_at = started_at;
    }

    pub fn report(&self, finished_at: DateTime<Utc>) -> Report {
        let meta = ReportMeta {
            title: self.meta.title.clone(),
            build: self.meta.build.clone(),
            started_at: Some(self.started_at),
            finished_at,
            name: self.respondent.clone(),
            shuffled: self.shuffled,
            question_count: self.questions.len(),
        };
        build_report(&self.questions, &self.answers, &self.dimensions, meta)
    }

    fn advance(&mut self) -> SessionStep {
        self.position = (self.position + 1).min(self.questions.len());
        if self.is_finished() {
            SessionStep::Finished
        } else {
            SessionStep::Question(self.position)
        }
    }
}
