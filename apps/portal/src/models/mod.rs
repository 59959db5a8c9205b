pub mod candidate;
pub mod job;

pub use candidate::{Candidate, CandidateStatus};
pub use job::{Job, JobStatus, Question, OPTIONS_PER_QUESTION};
