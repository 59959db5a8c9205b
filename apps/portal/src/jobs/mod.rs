// Job listings: validation, repository, HTTP handlers.

pub mod handlers;
pub mod repository;
pub mod validation;

pub use repository::{JobDraft, JobRepository};
