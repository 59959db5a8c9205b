use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CandidateStatus {
    Hired,
    Rejected,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
}

impl CandidateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Hired => "Hired",
            CandidateStatus::Rejected => "Rejected",
            CandidateStatus::InterviewScheduled => "Interview Scheduled",
        }
    }
}

/// One application of one person to one job.
///
/// `job_title` and `job_description` are copies taken at apply time; `job_id`
/// is the stable link back to the job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub resume_link: String,
    pub experience: String,
    pub job_title: String,
    pub job_description: String,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_assessment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CandidateStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<NaiveDate>,
}
