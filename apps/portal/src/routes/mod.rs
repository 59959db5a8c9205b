pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::candidates::handlers as candidates;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route("/api/v1/board", get(jobs::handle_job_board))
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route(
            "/api/v1/jobs/:id/candidates",
            get(jobs::handle_job_candidates),
        )
        .route("/api/v1/jobs/:id/applications", post(jobs::handle_apply))
        // Candidates
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate),
        )
        .route(
            "/api/v1/candidates/:id/status",
            patch(candidates::handle_update_status),
        )
        .route(
            "/api/v1/candidates/:id/interview-date",
            put(candidates::handle_save_interview_date),
        )
        // Assessments
        .route(
            "/api/v1/assessments/:job_title",
            get(assessment::handle_get_assessment),
        )
        .route(
            "/api/v1/assessments/:job_title/submit",
            post(assessment::handle_submit_assessment),
        )
        .with_state(state)
}
