//! Axum route handlers for the Candidates API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Candidate, CandidateStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: CandidateStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDateUpdate {
    pub interview_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct InterviewDateResponse {
    pub candidate: Candidate,
    pub saved: bool,
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Candidate>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.candidates().get(id)?))
}

/// PATCH /api/v1/candidates/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<Candidate>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.candidates().update_status(id, req.status)?))
}

/// PUT /api/v1/candidates/:id/interview-date
///
/// `saved` is false when the candidate's status is not `Interview Scheduled`;
/// the date is then discarded.
pub async fn handle_save_interview_date(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<InterviewDateUpdate>,
) -> Result<Json<InterviewDateResponse>, AppError> {
    let portal = state.portal()?;
    let (candidate, saved) = portal
        .candidates()
        .save_interview_date(id, req.interview_date)?;
    Ok(Json(InterviewDateResponse { candidate, saved }))
}
