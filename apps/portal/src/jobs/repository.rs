use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Job, JobStatus, Question};
use crate::store::{Collection, LocalStore};

use super::validation::validate_job_draft;

/// Recruiter-supplied fields of a job, used for both create and update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub job_title: String,
    pub job_description: String,
    #[serde(default)]
    pub assessment: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl JobDraft {
    fn into_parts(self) -> (String, String, bool, Vec<Question>) {
        let questions = if self.assessment {
            self.questions
        } else {
            Vec::new()
        };
        (self.job_title, self.job_description, self.assessment, questions)
    }
}

/// CRUD over the `jobs` collection. Each call is one read-modify-write.
#[derive(Clone)]
pub struct JobRepository {
    store: LocalStore,
}

impl JobRepository {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// All jobs in insertion order.
    pub fn list(&self) -> Vec<Job> {
        self.store.load(Collection::Jobs)
    }

    pub fn get(&self, id: Uuid) -> Result<Job, AppError> {
        self.list()
            .into_iter()
            .find(|job| job.id == id)
            .ok_or_else(|| job_not_found(id))
    }

    /// First job whose title matches exactly.
    pub fn find_by_title(&self, title: &str) -> Option<Job> {
        self.list().into_iter().find(|job| job.job_title == title)
    }

    pub fn create(&self, draft: JobDraft) -> Result<Job, AppError> {
        validate_job_draft(&draft)?;
        let mut jobs = self.load_for_write()?;
        ensure_title_free(&jobs, &draft.job_title, None)?;

        let (job_title, job_description, assessment, questions) = draft.into_parts();
        let job = Job {
            id: Uuid::new_v4(),
            job_title,
            job_description,
            assessment,
            questions,
            status: None,
        };

        jobs.push(job.clone());
        self.store.save(Collection::Jobs, &jobs)?;

        info!("Created job {} ('{}')", job.id, job.job_title);
        Ok(job)
    }

    /// Replaces the editable fields of a job. Id, position and status are kept.
    ///
    /// Applications keep their own copy of the title and description; keeping
    /// those in step is up to the caller.
    pub fn update(&self, id: Uuid, draft: JobDraft) -> Result<Job, AppError> {
        validate_job_draft(&draft)?;
        let mut jobs = self.load_for_write()?;
        ensure_title_free(&jobs, &draft.job_title, Some(id))?;
        let job = jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| job_not_found(id))?;

        let (job_title, job_description, assessment, questions) = draft.into_parts();
        job.job_title = job_title;
        job.job_description = job_description;
        job.assessment = assessment;
        job.questions = questions;
        let updated = job.clone();

        self.store.save(Collection::Jobs, &jobs)?;
        info!("Updated job {id}");
        Ok(updated)
    }

    /// Removes a job. Candidates referencing it are the caller's concern.
    pub fn delete(&self, id: Uuid) -> Result<Job, AppError> {
        let mut jobs = self.load_for_write()?;
        let position = jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or_else(|| job_not_found(id))?;
        let removed = jobs.remove(position);

        self.store.save(Collection::Jobs, &jobs)?;
        info!("Deleted job {id} ('{}')", removed.job_title);
        Ok(removed)
    }

    /// Flags a job as having received an application.
    pub fn mark_applied(&self, id: Uuid) -> Result<(), AppError> {
        let mut jobs = self.load_for_write()?;
        let job = jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| job_not_found(id))?;
        job.status = Some(JobStatus::ApplicationSubmitted);

        self.store.save(Collection::Jobs, &jobs)?;
        Ok(())
    }

    fn load_for_write(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.store.try_load(Collection::Jobs)?)
    }
}

/// Titles identify a job's assessment, so no two jobs may share one.
fn ensure_title_free(jobs: &[Job], title: &str, except: Option<Uuid>) -> Result<(), AppError> {
    let title = title.trim();
    let taken = jobs
        .iter()
        .any(|job| Some(job.id) != except && job.job_title.trim() == title);
    if taken {
        return Err(AppError::Conflict(format!(
            "A job titled '{title}' already exists"
        )));
    }
    Ok(())
}

fn job_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Job {id} not found"))
}
