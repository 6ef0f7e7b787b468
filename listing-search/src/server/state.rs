//! Shared application state for request handlers.

use std::sync::Arc;

use listing_search_repository::SearchIndexProvider;

use crate::orchestrator::ReindexOrchestrator;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The search index backend.
    pub provider: Arc<dyn SearchIndexProvider>,
    /// The reindex orchestrator, exposed for run-state reporting.
    pub orchestrator: Arc<ReindexOrchestrator>,
}
