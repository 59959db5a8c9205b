//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::candidates::ApplicationForm;
use crate::errors::AppError;
use crate::models::{Candidate, Job};
use crate::portal::{BoardEntry, JobDeletion};
use crate::state::AppState;

use super::JobDraft;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCandidatesResponse {
    pub job: Job,
    pub candidates: Vec<Candidate>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.jobs().list()))
}

/// GET /api/v1/board
///
/// The candidate-facing listing: no question content, plus whether the job has
/// been applied to and its assessment completed.
pub async fn handle_job_board(
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardEntry>>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.board()))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let portal = state.portal()?;
    let job = portal.jobs().create(draft)?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.jobs().get(id)?))
}

/// PUT /api/v1/jobs/:id
///
/// Existing applications pick up the new title and description.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<JobDraft>,
) -> Result<Json<Job>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.update_job(id, draft)?))
}

/// DELETE /api/v1/jobs/:id
///
/// Applies the configured delete policy: conflict when applications exist
/// under `forbid`, removes them under `cascade`.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDeletion>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.delete_job(id)?))
}

/// GET /api/v1/jobs/:id/candidates
///
/// Applicants matched on the job's current title and description, as the
/// recruiter's candidate view lists them.
pub async fn handle_job_candidates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobCandidatesResponse>, AppError> {
    let portal = state.portal()?;
    let job = portal.jobs().get(id)?;
    let candidates = portal
        .candidates()
        .list_matching(&job.job_title, &job.job_description);
    Ok(Json(JobCandidatesResponse { job, candidates }))
}

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ApplicationForm>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    let portal = state.portal()?;
    let candidate = portal.apply(id, &form)?;
    Ok((StatusCode::CREATED, Json(candidate)))
}
