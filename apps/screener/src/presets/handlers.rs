//! Axum route handlers for job description presets.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::presets::store::JobPreset;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PresetListResponse {
    pub job_descriptions: Vec<JobPreset>,
}

#[derive(Debug, Deserialize)]
pub struct SavePresetRequest {
    pub description: String,
}

/// GET /api/v1/job-descriptions
pub async fn handle_list_presets(State(state): State<AppState>) -> Json<PresetListResponse> {
    Json(PresetListResponse {
        job_descriptions: state.presets.list().await,
    })
}

/// PUT /api/v1/job-descriptions/:title
pub async fn handle_save_preset(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(request): Json<SavePresetRequest>,
) -> Result<Json<JobPreset>, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let preset = state.presets.save(&title, &request.description).await?;
    Ok(Json(preset))
}
