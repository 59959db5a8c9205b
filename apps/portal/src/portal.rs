//! Cross-repository flows: applying, deleting jobs, taking assessments.
//!
//! Repositories each own one collection. Anything that touches both (or
//! needs a policy decision) goes through `Portal`.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::assessment::{AssessmentOutcome, AssessmentSession, QuestionView};
use crate::candidates::{ApplicationForm, CandidateRepository};
use crate::errors::AppError;
use crate::jobs::{JobDraft, JobRepository};
use crate::models::{Candidate, Job, JobStatus};
use crate::store::LocalStore;

/// What happens to applications when their job is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobDeletePolicy {
    /// Refuse to delete a job that still has applications.
    #[default]
    Forbid,
    /// Delete the job's applications along with it.
    Cascade,
}

impl FromStr for JobDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forbid" => Ok(JobDeletePolicy::Forbid),
            "cascade" => Ok(JobDeletePolicy::Cascade),
            other => Err(format!("unknown job delete policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDeletion {
    pub job: Job,
    pub removed_candidates: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSheet {
    pub job_id: Uuid,
    pub job_title: String,
    pub questions: Vec<QuestionView>,
}

/// A job as listed to candidates: no question content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    pub id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub assessment: bool,
    pub question_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    pub assessment_completed: bool,
}

pub struct Portal {
    jobs: JobRepository,
    candidates: CandidateRepository,
    delete_policy: JobDeletePolicy,
}

impl Portal {
    pub fn new(store: LocalStore, delete_policy: JobDeletePolicy) -> Self {
        Self {
            jobs: JobRepository::new(store.clone()),
            candidates: CandidateRepository::new(store),
            delete_policy,
        }
    }

    pub fn jobs(&self) -> &JobRepository {
        &self.jobs
    }

    pub fn candidates(&self) -> &CandidateRepository {
        &self.candidates
    }

    pub fn delete_policy(&self) -> JobDeletePolicy {
        self.delete_policy
    }

    /// Candidate-facing job list with application and assessment state.
    pub fn board(&self) -> Vec<BoardEntry> {
        self.jobs
            .list()
            .into_iter()
            .map(|job| BoardEntry {
                assessment_completed: self.candidates.has_completed_assessment(&job.job_title),
                question_count: job.questions.len(),
                id: job.id,
                job_title: job.job_title,
                job_description: job.job_description,
                assessment: job.assessment,
                status: job.status,
            })
            .collect()
    }

    /// Submits an application and flags the job as applied.
    ///
    /// The application is written first: if flagging the job then fails, the
    /// error is returned but the application stands, and the next successful
    /// apply sets the flag.
    pub fn apply(&self, job_id: Uuid, form: &ApplicationForm) -> Result<Candidate, AppError> {
        let job = self.jobs.get(job_id)?;
        let candidate = self.candidates.apply(form, &job)?;
        self.jobs.mark_applied(job.id)?;
        Ok(candidate)
    }

    /// Edits a job and carries the new title and description over to its
    /// applications, so they stay listed and can still take the assessment.
    pub fn update_job(&self, job_id: Uuid, draft: JobDraft) -> Result<Job, AppError> {
        let job = self.jobs.update(job_id, draft)?;
        self.candidates.sync_job_details(&job)?;
        Ok(job)
    }

    /// Deletes a job under the configured policy.
    ///
    /// With `Cascade` the job goes first: a failure removing its applications
    /// leaves them orphaned rather than leaving a job whose applications are
    /// gone.
    pub fn delete_job(&self, job_id: Uuid) -> Result<JobDeletion, AppError> {
        match self.delete_policy {
            JobDeletePolicy::Forbid => {
                let applications = self.candidates.list_for_job(job_id).len();
                if applications > 0 {
                    return Err(AppError::Conflict(format!(
                        "Job {job_id} has {applications} application(s) and cannot be deleted"
                    )));
                }
                let job = self.jobs.delete(job_id)?;
                Ok(JobDeletion {
                    job,
                    removed_candidates: 0,
                })
            }
            JobDeletePolicy::Cascade => {
                let job = self.jobs.delete(job_id)?;
                let removed_candidates = self.candidates.remove_for_job(job_id)?;
                Ok(JobDeletion {
                    job,
                    removed_candidates,
                })
            }
        }
    }

    /// Questions for the job with this title, without answers.
    pub fn start_assessment(&self, job_title: &str) -> Result<AssessmentSheet, AppError> {
        let mut session = AssessmentSession::new(job_title, Uuid::nil());
        session.resolve(&self.jobs)?;
        let questions = session.questions_for_display();
        let job = session
            .job()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("resolved session has no job")))?;

        Ok(AssessmentSheet {
            job_id: job.id,
            job_title: job.job_title.clone(),
            questions,
        })
    }

    /// Runs a whole assessment session for one candidate in one step.
    ///
    /// The candidate must have applied under `job_title`; answers are graded
    /// against the job the candidate applied to.
    pub fn submit_assessment(
        &self,
        job_title: &str,
        candidate_id: Uuid,
        answers: &BTreeMap<usize, usize>,
    ) -> Result<AssessmentOutcome, AppError> {
        let candidate = self.candidates.get(candidate_id)?;
        if candidate.job_title != job_title {
            return Err(AppError::Validation(format!(
                "Candidate {candidate_id} did not apply to '{job_title}'"
            )));
        }

        let mut session = AssessmentSession::new(job_title, candidate_id);
        session.resolve_job(&self.jobs, candidate.job_id)?;
        for (&question, &option) in answers {
            session.select(question, option)?;
        }
        let outcome = session.submit(&self.candidates)?;
        info!("Assessment '{job_title}' submitted by {candidate_id}");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::Question;
    use crate::store::faulty::FaultyStore;

    fn portal(policy: JobDeletePolicy) -> Portal {
        Portal::new(LocalStore::in_memory(), policy)
    }

    fn dev_job() -> JobDraft {
        JobDraft {
            job_title: "Dev".to_string(),
            job_description: "Build stuff".to_string(),
            assessment: true,
            questions: vec![Question {
                question: "2+2?".to_string(),
                options: ["3", "4", "5", "6"].map(String::from),
                correct_answer: "1".to_string(),
            }],
        }
    }

    fn alice() -> ApplicationForm {
        ApplicationForm {
            name: "Alice".to_string(),
            age: "30".to_string(),
            email: "alice@example.com".to_string(),
            resume_link: "https://example.com/alice".to_string(),
            experience: "5 years".to_string(),
        }
    }

    #[test]
    fn test_end_to_end_apply_and_assess() {
        let portal = portal(JobDeletePolicy::Forbid);
        let job = portal.jobs().create(dev_job()).unwrap();

        let candidate = portal.apply(job.id, &alice()).unwrap();
        assert_eq!(
            portal.jobs().get(job.id).unwrap().status,
            Some(JobStatus::ApplicationSubmitted)
        );

        let sheet = portal.start_assessment("Dev").unwrap();
        assert_eq!(sheet.questions.len(), 1);
        assert_eq!(sheet.job_id, job.id);

        let answers = BTreeMap::from([(0, 1)]);
        let outcome = portal
            .submit_assessment("Dev", candidate.id, &answers)
            .unwrap();
        assert_eq!(outcome, AssessmentOutcome { score: 1, total: 1 });

        let stored = portal.candidates().get(candidate.id).unwrap();
        assert_eq!(stored.score, Some(1));
        assert!(stored.completed_assessment);
    }

    #[test]
    fn test_invalid_application_does_not_mark_job() {
        let portal = portal(JobDeletePolicy::Forbid);
        let job = portal.jobs().create(dev_job()).unwrap();
        let mut form = alice();
        form.email = "not-an-email".to_string();

        assert!(portal.apply(job.id, &form).is_err());
        assert_eq!(portal.jobs().get(job.id).unwrap().status, None);
        assert!(portal.candidates().list().is_empty());
    }

    #[test]
    fn test_apply_to_unknown_job_is_not_found() {
        let portal = portal(JobDeletePolicy::Forbid);
        assert!(matches!(
            portal.apply(Uuid::new_v4(), &alice()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_forbid_policy_blocks_delete_with_candidates() {
        let portal = portal(JobDeletePolicy::Forbid);
        let job = portal.jobs().create(dev_job()).unwrap();
        portal.apply(job.id, &alice()).unwrap();

        assert!(matches!(portal.delete_job(job.id), Err(AppError::Conflict(_))));
        assert_eq!(portal.jobs().list().len(), 1);
    }

    #[test]
    fn test_forbid_policy_allows_delete_without_candidates() {
        let portal = portal(JobDeletePolicy::Forbid);
        let job = portal.jobs().create(dev_job()).unwrap();
        let deletion = portal.delete_job(job.id).unwrap();
        assert_eq!(deletion.removed_candidates, 0);
        assert!(portal.jobs().list().is_empty());
    }

    #[test]
    fn test_cascade_policy_removes_candidates() {
        let portal = portal(JobDeletePolicy::Cascade);
        let job = portal.jobs().create(dev_job()).unwrap();
        portal.apply(job.id, &alice()).unwrap();

        let deletion = portal.delete_job(job.id).unwrap();
        assert_eq!(deletion.removed_candidates, 1);
        assert!(portal.candidates().list().is_empty());
        assert!(portal.jobs().list().is_empty());
    }

    #[test]
    fn test_cascade_keeps_candidates_when_job_delete_fails() {
        let backend = Arc::new(FaultyStore::default());
        let portal = Portal::new(LocalStore::new(backend.clone()), JobDeletePolicy::Cascade);
        let job = portal.jobs().create(dev_job()).unwrap();
        let candidate = portal.apply(job.id, &alice()).unwrap();
        backend.fail_writes("jobs");

        assert!(matches!(portal.delete_job(job.id), Err(AppError::Store(_))));
        assert_eq!(portal.jobs().list().len(), 1);
        assert_eq!(portal.candidates().list(), vec![candidate]);
    }

    #[test]
    fn test_delete_unknown_job_is_not_found() {
        for policy in [JobDeletePolicy::Forbid, JobDeletePolicy::Cascade] {
            let portal = portal(policy);
            assert!(matches!(
                portal.delete_job(Uuid::new_v4()),
                Err(AppError::NotFound(_))
            ));
        }
    }

    #[test]
    fn test_submit_for_other_job_rejected() {
        let portal = portal(JobDeletePolicy::Forbid);
        let dev = portal.jobs().create(dev_job()).unwrap();
        let mut ops = dev_job();
        ops.job_title = "Ops".to_string();
        portal.jobs().create(ops).unwrap();
        let candidate = portal.apply(dev.id, &alice()).unwrap();

        let err = portal
            .submit_assessment("Ops", candidate.id, &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!portal.candidates().get(candidate.id).unwrap().completed_assessment);
    }

    #[test]
    fn test_edited_job_keeps_its_candidates() {
        let portal = portal(JobDeletePolicy::Forbid);
        let job = portal.jobs().create(dev_job()).unwrap();
        let candidate = portal.apply(job.id, &alice()).unwrap();

        let mut edit = dev_job();
        edit.job_title = "Senior Dev".to_string();
        edit.job_description = "Build bigger stuff".to_string();
        edit.questions[0].correct_answer = "2".to_string();
        portal.update_job(job.id, edit).unwrap();

        let listed = portal
            .candidates()
            .list_matching("Senior Dev", "Build bigger stuff");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, candidate.id);

        assert!(matches!(
            portal.submit_assessment("Dev", candidate.id, &BTreeMap::new()),
            Err(AppError::Validation(_))
        ));
        let outcome = portal
            .submit_assessment("Senior Dev", candidate.id, &BTreeMap::from([(0, 2)]))
            .unwrap();
        assert_eq!(outcome, AssessmentOutcome { score: 1, total: 1 });
    }

    #[test]
    fn test_update_job_to_taken_title_leaves_candidates_alone() {
        let portal = portal(JobDeletePolicy::Forbid);
        let dev = portal.jobs().create(dev_job()).unwrap();
        let mut ops = dev_job();
        ops.job_title = "Ops".to_string();
        portal.jobs().create(ops.clone()).unwrap();
        let candidate = portal.apply(dev.id, &alice()).unwrap();

        assert!(matches!(
            portal.update_job(dev.id, ops),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(portal.candidates().get(candidate.id).unwrap().job_title, "Dev");
    }

    #[test]
    fn test_grading_follows_the_candidates_job() {
        let portal = portal(JobDeletePolicy::Forbid);
        let first = portal.jobs().create(dev_job()).unwrap();
        let mut second = dev_job();
        second.questions[0].correct_answer = "0".to_string();
        assert!(matches!(
            portal.jobs().create(second.clone()),
            Err(AppError::Conflict(_))
        ));

        // A second "Dev" can only exist under another title; grading follows the
        // candidate's own job.
        second.job_title = "Dev II".to_string();
        let other = portal.jobs().create(second).unwrap();
        let candidate = portal.apply(other.id, &alice()).unwrap();
        let outcome = portal
            .submit_assessment("Dev II", candidate.id, &BTreeMap::from([(0, 0)]))
            .unwrap();
        assert_eq!(outcome.score, 1);
        assert_eq!(portal.jobs().list()[0].id, first.id);
    }

    #[test]
    fn test_second_submission_rejected() {
        let portal = portal(JobDeletePolicy::Forbid);
        let job = portal.jobs().create(dev_job()).unwrap();
        let candidate = portal.apply(job.id, &alice()).unwrap();
        let answers = BTreeMap::from([(0, 1)]);

        portal.submit_assessment("Dev", candidate.id, &answers).unwrap();
        let err = portal
            .submit_assessment("Dev", candidate.id, &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(portal.candidates().get(candidate.id).unwrap().score, Some(1));
    }

    #[test]
    fn test_start_assessment_without_questions_unavailable() {
        let portal = portal(JobDeletePolicy::Forbid);
        let mut plain = dev_job();
        plain.assessment = false;
        portal.jobs().create(plain).unwrap();
        assert!(matches!(
            portal.start_assessment("Dev"),
            Err(AppError::AssessmentUnavailable(_))
        ));
    }

    #[test]
    fn test_board_tracks_application_and_completion() {
        let portal = portal(JobDeletePolicy::Forbid);
        let job = portal.jobs().create(dev_job()).unwrap();

        let board = portal.board();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].status, None);
        assert_eq!(board[0].question_count, 1);
        assert!(!board[0].assessment_completed);

        let candidate = portal.apply(job.id, &alice()).unwrap();
        portal
            .submit_assessment("Dev", candidate.id, &BTreeMap::new())
            .unwrap();

        let board = portal.board();
        assert_eq!(board[0].status, Some(JobStatus::ApplicationSubmitted));
        assert!(board[0].assessment_completed);
    }

    #[test]
    fn test_delete_policy_from_str() {
        assert_eq!("forbid".parse::<JobDeletePolicy>(), Ok(JobDeletePolicy::Forbid));
        assert_eq!(" Cascade ".parse::<JobDeletePolicy>(), Ok(JobDeletePolicy::Cascade));
        assert!("orphan".parse::<JobDeletePolicy>().is_err());
    }
}
