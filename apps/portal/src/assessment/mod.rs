// Assessment engine: per-candidate quiz sessions over a job's question set.
// A session is Loading until its job resolves, Active while answers are
// collected, and Submitted once scored. Nothing survives the session itself.

pub mod engine;
pub mod handlers;
pub mod scoring;

pub use engine::{AssessmentOutcome, AssessmentSession, QuestionView};
