use std::sync::Arc;

use crate::config::Config;
use crate::documents::RecordStore;
use crate::matching::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// Pluggable scorer. Default: SkillOverlapScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub config: Config,
}
