use std::sync::Arc;

use crate::analytics::AnalyticsSender;
use crate::config::Config;
use crate::planning::matcher::CareerMatcher;
use crate::store::CareerStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production, in-memory in development mode and tests.
    pub store: Arc<dyn CareerStore>,
    /// Pluggable career matcher. Default: KeywordCareerMatcher.
    pub matcher: Arc<dyn CareerMatcher>,
    pub analytics: AnalyticsSender,
    pub config: Config,
}
