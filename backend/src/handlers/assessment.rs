//! HTTP handlers for disease risk assessments

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::assessment::{AssessmentRequest, AssessmentResponse};
use crate::AppState;

/// Run a disease risk assessment for a field
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(input): Json<AssessmentRequest>,
) -> AppResult<Json<AssessmentResponse>> {
    let response = state.orchestrator.assess(input).await?;
    Ok(Json(response))
}
