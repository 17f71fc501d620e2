//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::scorer::MatchScore;
use crate::screening::pipeline::{
    screen_documents, CandidateResult, ScreeningFailure, UploadedDocument,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate_text: String,
    pub reference_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub screening_id: Uuid,
    pub screened_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub job_description: String,
    pub total_candidates: usize,
    pub average_score: f64,
    pub results: Vec<CandidateResult>,
    pub failures: Vec<ScreeningFailure>,
}

/// Multipart fields collected before screening starts.
#[derive(Debug, Default)]
struct ScreeningForm {
    uploads: Vec<UploadedDocument>,
    jd_text: Option<String>,
    jd_title: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores one candidate text against one reference text.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchScore>, AppError> {
    let scorer = state.scorer.clone();

    // Scoring is CPU-bound and grows with the body size.
    let score = tokio::task::spawn_blocking(move || {
        scorer.score(&request.candidate_text, &request.reference_text)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Match task failed: {e}")))?;

    Ok(Json(score))
}

/// POST /api/v1/screenings
///
/// Multipart form: one or more `files` parts plus `jd_text` and/or `jd_title`.
/// A non-blank `jd_text` wins; otherwise `jd_title` selects a stored preset
/// and is echoed back as `job_title`.
pub async fn handle_screening(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let form = read_form(multipart).await?;

    if form.uploads.is_empty() {
        return Err(AppError::Validation(
            "At least one resume file is required".to_string(),
        ));
    }

    let (job_title, job_description) = match (form.jd_text, form.jd_title) {
        (Some(text), _) => (None, text),
        (None, Some(title)) => {
            let description = state.presets.get(&title).await.ok_or_else(|| {
                AppError::NotFound(format!("Job description '{title}' not found"))
            })?;
            (Some(title), description)
        }
        (None, None) => {
            return Err(AppError::Validation(
                "Provide jd_text or jd_title".to_string(),
            ))
        }
    };

    let total_candidates = form.uploads.len();
    let scorer = state.scorer.clone();
    let reference = job_description.clone();
    let uploads = form.uploads;

    // Extraction and scoring are CPU-bound.
    let outcome = tokio::task::spawn_blocking(move || {
        screen_documents(&uploads, &reference, scorer.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Screening task failed: {e}")))?;

    Ok(Json(ScreeningResponse {
        screening_id: Uuid::new_v4(),
        screened_at: Utc::now(),
        job_title,
        job_description,
        total_candidates,
        average_score: outcome.average_score,
        results: outcome.results,
        failures: outcome.failures,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<ScreeningForm, AppError> {
    let mut form = ScreeningForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation("File part is missing a file name".into()))?;
                let content = field.bytes().await?;
                form.uploads.push(UploadedDocument { file_name, content });
            }
            "jd_text" => form.jd_text = non_blank(field.text().await?),
            "jd_title" => form.jd_title = non_blank(field.text().await?),
            other => tracing::debug!("Ignoring unexpected multipart field '{other}'"),
        }
    }

    Ok(form)
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
