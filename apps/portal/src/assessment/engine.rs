use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::CandidateRepository;
use crate::errors::AppError;
use crate::jobs::JobRepository;
use crate::models::{Job, Question, OPTIONS_PER_QUESTION};

use super::scoring::score_answers;

/// Score shown to the candidate after submission.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    pub score: u32,
    pub total: usize,
}

/// A question as shown to a candidate: no correct answer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Active { job: Job },
    Submitted { job: Job, outcome: AssessmentOutcome },
}

/// One candidate's pass through one job's assessment.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    job_title: String,
    candidate_id: Uuid,
    answers: BTreeMap<usize, usize>,
    state: SessionState,
}

impl AssessmentSession {
    pub fn new(job_title: impl Into<String>, candidate_id: Uuid) -> Self {
        Self {
            job_title: job_title.into(),
            candidate_id,
            answers: BTreeMap::new(),
            state: SessionState::Loading,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Looks up the job by title and enters Active.
    ///
    /// Fails with `AssessmentUnavailable` when no job has the title or the job
    /// carries no questions; the caller should send the user back to the job
    /// list.
    pub fn resolve(&mut self, jobs: &JobRepository) -> Result<(), AppError> {
        self.ensure_loading()?;
        let found = jobs.find_by_title(&self.job_title);
        self.activate(found)
    }

    /// Like [`resolve`](Self::resolve), but for the job a candidate actually
    /// applied to.
    pub fn resolve_job(&mut self, jobs: &JobRepository, job_id: Uuid) -> Result<(), AppError> {
        self.ensure_loading()?;
        let found = jobs.get(job_id).ok();
        self.activate(found)
    }

    fn ensure_loading(&self) -> Result<(), AppError> {
        if !matches!(self.state, SessionState::Loading) {
            return Err(AppError::Conflict(
                "Assessment session already resolved".to_string(),
            ));
        }
        Ok(())
    }

    fn activate(&mut self, found: Option<Job>) -> Result<(), AppError> {
        let job = match found {
            Some(job) if job.has_questions() => job,
            Some(_) => {
                warn!("Job '{}' has no assessment questions", self.job_title);
                return Err(AppError::AssessmentUnavailable(format!(
                    "Job '{}' has no assessment",
                    self.job_title
                )));
            }
            None => {
                return Err(AppError::AssessmentUnavailable(format!(
                    "No job titled '{}'",
                    self.job_title
                )));
            }
        };

        self.state = SessionState::Active { job };
        Ok(())
    }

    /// The resolved job, once past Loading.
    pub fn job(&self) -> Option<&Job> {
        match &self.state {
            SessionState::Loading => None,
            SessionState::Active { job } | SessionState::Submitted { job, .. } => Some(job),
        }
    }

    /// Questions of the resolved job, stripped of their answers.
    pub fn questions_for_display(&self) -> Vec<QuestionView> {
        self.job()
            .map(|job| job.questions.iter().map(QuestionView::from).collect())
            .unwrap_or_default()
    }

    /// Records the chosen option for a question, replacing any earlier choice.
    pub fn select(&mut self, question_index: usize, option_index: usize) -> Result<(), AppError> {
        let SessionState::Active { job } = &self.state else {
            return Err(AppError::Conflict(
                "Assessment is not accepting answers".to_string(),
            ));
        };

        if question_index >= job.questions.len() {
            return Err(AppError::Validation(format!(
                "Question {question_index} does not exist"
            )));
        }
        if option_index >= OPTIONS_PER_QUESTION {
            return Err(AppError::Validation(format!(
                "Option {option_index} does not exist"
            )));
        }

        self.answers.insert(question_index, option_index);
        Ok(())
    }

    /// Scores the collected answers, stores the result on the candidate and
    /// enters Submitted.
    pub fn submit(&mut self, candidates: &CandidateRepository) -> Result<AssessmentOutcome, AppError> {
        let SessionState::Active { job } = &self.state else {
            return Err(AppError::Conflict("Assessment is not active".to_string()));
        };
        let job = job.clone();

        let outcome = AssessmentOutcome {
            score: score_answers(&job.questions, &self.answers),
            total: job.questions.len(),
        };
        candidates.record_assessment_result(self.candidate_id, outcome.score)?;

        info!(
            "Candidate {} scored {} out of {} on '{}'",
            self.candidate_id, outcome.score, outcome.total, self.job_title
        );
        self.state = SessionState::Submitted { job, outcome };
        Ok(outcome)
    }
}
