// Candidate applications: form validation, repository, HTTP handlers.

pub mod handlers;
pub mod repository;
pub mod validation;

pub use repository::CandidateRepository;
pub use validation::ApplicationForm;
