//! Axum route handlers for the Assessment API.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::portal::AssessmentSheet;
use crate::state::AppState;

use super::engine::AssessmentOutcome;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentRequest {
    pub candidate_id: Uuid,
    /// Question index to selected option index. JSON object keys are strings
    /// ("0", "1", ...) and are parsed as indices.
    #[serde(default)]
    pub answers: BTreeMap<usize, usize>,
}

/// GET /api/v1/assessments/:job_title
///
/// 404 with `ASSESSMENT_UNAVAILABLE` and a redirect to the job list when the
/// job is unknown or has no questions.
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(job_title): Path<String>,
) -> Result<Json<AssessmentSheet>, AppError> {
    let portal = state.portal()?;
    Ok(Json(portal.start_assessment(&job_title)?))
}

/// POST /api/v1/assessments/:job_title/submit
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    Path(job_title): Path<String>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Result<Json<AssessmentOutcome>, AppError> {
    let portal = state.portal()?;
    let outcome = portal.submit_assessment(&job_title, req.candidate_id, &req.answers)?;
    Ok(Json(outcome))
}
