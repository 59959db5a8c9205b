use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Candidate, CandidateStatus, Job};
use crate::store::{Collection, LocalStore};

use super::validation::{validate_application, ApplicationForm};

/// CRUD over the `candidates` collection. Each call is one read-modify-write.
#[derive(Clone)]
pub struct CandidateRepository {
    store: LocalStore,
}

impl CandidateRepository {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Candidate> {
        self.store.load(Collection::Candidates)
    }

    pub fn get(&self, id: Uuid) -> Result<Candidate, AppError> {
        self.list()
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| candidate_not_found(id))
    }

    /// Candidates whose copied title and description both equal the given pair.
    pub fn list_matching(&self, job_title: &str, job_description: &str) -> Vec<Candidate> {
        self.list()
            .into_iter()
            .filter(|c| c.job_title == job_title && c.job_description == job_description)
            .collect()
    }

    pub fn list_for_job(&self, job_id: Uuid) -> Vec<Candidate> {
        self.list()
            .into_iter()
            .filter(|c| c.job_id == job_id)
            .collect()
    }

    /// Whether anyone who applied under this title has finished its assessment.
    pub fn has_completed_assessment(&self, job_title: &str) -> bool {
        self.list()
            .iter()
            .any(|c| c.job_title == job_title && c.completed_assessment)
    }

    /// Validates the form and appends a new application to `job`.
    ///
    /// Nothing is written when validation fails. Marking the job as applied is
    /// left to the caller.
    pub fn apply(&self, form: &ApplicationForm, job: &Job) -> Result<Candidate, AppError> {
        let valid = validate_application(form)?;
        let candidate = Candidate {
            id: Uuid::new_v4(),
            job_id: job.id,
            name: valid.name,
            age: valid.age,
            email: valid.email,
            resume_link: valid.resume_link,
            experience: valid.experience,
            job_title: job.job_title.clone(),
            job_description: job.job_description.clone(),
            applied_at: Utc::now(),
            completed_assessment: false,
            score: None,
            status: None,
            interview_date: None,
        };

        let mut candidates = self.load_for_write()?;
        candidates.push(candidate.clone());
        self.store.save(Collection::Candidates, &candidates)?;

        info!(
            "Candidate {} applied to job {} ('{}')",
            candidate.id, job.id, job.job_title
        );
        Ok(candidate)
    }

    /// Sets the hiring status. Any status other than `Interview Scheduled`
    /// clears a previously saved interview date.
    pub fn update_status(&self, id: Uuid, status: CandidateStatus) -> Result<Candidate, AppError> {
        self.modify(id, |candidate| {
            candidate.status = Some(status);
            if status != CandidateStatus::InterviewScheduled {
                candidate.interview_date = None;
            }
            Ok(())
        })
        .inspect(|_| info!("Candidate {id} status set to '{}'", status.as_str()))
    }

    /// Saves an interview date if the candidate's interview is scheduled.
    ///
    /// Returns the candidate and whether the date was saved; for any other
    /// status storage is left untouched.
    pub fn save_interview_date(
        &self,
        id: Uuid,
        date: NaiveDate,
    ) -> Result<(Candidate, bool), AppError> {
        let candidate = self.get(id)?;
        if candidate.status != Some(CandidateStatus::InterviewScheduled) {
            return Ok((candidate, false));
        }

        let updated = self.modify(id, |candidate| {
            candidate.interview_date = Some(date);
            Ok(())
        })?;
        info!("Candidate {id} interview scheduled for {date}");
        Ok((updated, true))
    }

    /// Stores an assessment score. A candidate is scored at most once.
    pub fn record_assessment_result(&self, id: Uuid, score: u32) -> Result<Candidate, AppError> {
        self.modify(id, |candidate| {
            if candidate.completed_assessment {
                return Err(AppError::Conflict(format!(
                    "Candidate {id} has already completed the assessment"
                )));
            }
            candidate.completed_assessment = true;
            candidate.score = Some(score);
            Ok(())
        })
        .inspect(|_| info!("Candidate {id} scored {score}"))
    }

    /// Deletes every application to `job_id`, returning how many were removed.
    pub fn remove_for_job(&self, job_id: Uuid) -> Result<usize, AppError> {
        let mut candidates = self.load_for_write()?;
        let before = candidates.len();
        candidates.retain(|c| c.job_id != job_id);
        let removed = before - candidates.len();

        if removed > 0 {
            self.store.save(Collection::Candidates, &candidates)?;
            info!("Removed {removed} candidate(s) of job {job_id}");
        }
        Ok(removed)
    }

    /// Copies an edited job's title and description onto its applications.
    pub fn sync_job_details(&self, job: &Job) -> Result<usize, AppError> {
        let mut candidates = self.load_for_write()?;
        let mut changed = 0;
        for candidate in candidates.iter_mut().filter(|c| c.job_id == job.id) {
            if candidate.job_title != job.job_title
                || candidate.job_description != job.job_description
            {
                candidate.job_title = job.job_title.clone();
                candidate.job_description = job.job_description.clone();
                changed += 1;
            }
        }

        if changed > 0 {
            self.store.save(Collection::Candidates, &candidates)?;
            info!("Refreshed job details on {changed} candidate(s) of job {}", job.id);
        }
        Ok(changed)
    }

    fn load_for_write(&self) -> Result<Vec<Candidate>, AppError> {
        Ok(self.store.try_load(Collection::Candidates)?)
    }

    fn modify<F>(&self, id: Uuid, change: F) -> Result<Candidate, AppError>
    where
        F: FnOnce(&mut Candidate) -> Result<(), AppError>,
    {
        let mut candidates = self.load_for_write()?;
        let candidate = candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| candidate_not_found(id))?;
        change(candidate)?;
        let updated = candidate.clone();

        self.store.save(Collection::Candidates, &candidates)?;
        Ok(updated)
    }
}

fn candidate_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Candidate {id} not found"))
}
