use std::sync::Arc;

use crate::config::Config;
use crate::matching::scorer::MatchScorer;
use crate::presets::store::JobPresetStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable match scorer. Default: TfidfMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub presets: Arc<JobPresetStore>,
}
