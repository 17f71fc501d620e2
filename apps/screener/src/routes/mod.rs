pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::presets::handlers as presets;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/match", post(screening::handle_match))
        .route("/api/v1/screenings", post(screening::handle_screening))
        // Job description presets
        .route(
            "/api/v1/job-descriptions",
            get(presets::handle_list_presets),
        )
        .route(
            "/api/v1/job-descriptions/:title",
            put(presets::handle_save_preset),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
