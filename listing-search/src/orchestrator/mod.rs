//! Reindex orchestrator.
//!
//! Drives the full reindex run: ensure the index exists, page through the
//! published listings sequentially, map them, and issue exactly one bulk
//! load. The run is all-or-nothing; a failed page fetch discards
//! everything fetched before it and no partial index mutation is
//! attempted. Recovery from a failed run is a process restart, never an
//! automatic retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use listing_search_repository::SearchIndexProvider;

use crate::catalog::CatalogClient;
use crate::errors::SyncError;
use crate::mapper::map_to_document;

/// Configuration for the reindex orchestrator.
#[derive(Debug, Clone)]
pub struct ReindexConfig {
    /// Page size used when fetching from the catalog service.
    pub page_size: u32,
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self { page_size: 100 }
    }
}

/// Observable state of the current (or last) reindex run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    /// No run has started yet.
    Idle,
    /// Ensuring the index and mappings exist.
    CreatingIndex,
    /// Fetching the given catalog page.
    Fetching { page: u32 },
    /// Mapping accumulated listings into documents.
    Mapping,
    /// Issuing the single bulk load.
    BulkLoading,
    /// The run finished; `indexed` documents were loaded.
    Done { indexed: usize },
    /// The run aborted.
    Failed { reason: String },
}

/// Outcome of a completed reindex run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReindexSummary {
    /// Number of catalog pages fetched.
    pub pages_fetched: u32,
    /// Number of documents bulk-loaded into the index.
    pub indexed: usize,
}

/// Orchestrator for the startup reindex.
///
/// Owns the run state explicitly and guards against re-entrancy with an
/// atomic flag: a second `run` while one is in flight is rejected with
/// [`SyncError::AlreadyRunning`] instead of racing the first.
pub struct ReindexOrchestrator {
    catalog: Arc<dyn CatalogClient>,
    provider: Arc<dyn SearchIndexProvider>,
    config: ReindexConfig,
    running: AtomicBool,
    state: Mutex<RunState>,
}

impl ReindexOrchestrator {
    /// Create a new orchestrator with the default configuration.
    pub fn new(catalog: Arc<dyn CatalogClient>, provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(catalog, provider, ReindexConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        catalog: Arc<dyn CatalogClient>,
        provider: Arc<dyn SearchIndexProvider>,
        config: ReindexConfig,
    ) -> Self {
        Self {
            catalog,
            provider,
            config,
            running: AtomicBool::new(false),
            state: Mutex::new(RunState::Idle),
        }
    }

    /// Snapshot of the current run state.
    pub fn state(&self) -> RunState {
        self.state.lock().expect("run state lock poisoned").clone()
    }

    fn set_state(&self, next: RunState) {
        *self.state.lock().expect("run state lock poisoned") = next;
    }

    /// Execute one full reindex run.
    ///
    /// Rejects the call with [`SyncError::AlreadyRunning`] if another run
    /// is active. Otherwise drives the state machine to `Done` or
    /// `Failed`, logging the terminal state with counts.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<ReindexSummary, SyncError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Reindex requested while another run is active");
            return Err(SyncError::AlreadyRunning);
        }

        info!("Starting full reindex of published listings");
        let result = self.run_inner().await;

        match &result {
            Ok(summary) => {
                info!(
                    pages_fetched = summary.pages_fetched,
                    indexed = summary.indexed,
                    "Reindex run complete"
                );
                self.set_state(RunState::Done {
                    indexed: summary.indexed,
                });
            }
            Err(e) => {
                error!(error = %e, "Reindex run failed");
                self.set_state(RunState::Failed {
                    reason: e.to_string(),
                });
            }
        }

        self.running.store(false, Ordering::SeqCst);
        result
    }

    async fn run_inner(&self) -> Result<ReindexSummary, SyncError> {
        self.set_state(RunState::CreatingIndex);
        self.provider.ensure_index_exists().await?;

        let mut listings = Vec::new();
        let mut page = 1u32;

        // Pages are fetched strictly in order; has_next_page from page N
        // gates whether page N+1 is fetched at all. The loop trusts the
        // upstream to eventually report has_next_page = false.
        loop {
            self.set_state(RunState::Fetching { page });
            let fetched = self
                .catalog
                .fetch_published_page(page, self.config.page_size)
                .await?;

            listings.extend(fetched.items);
            info!(page = page, total_so_far = listings.len(), "Fetched catalog page");

            if !fetched.has_next_page {
                break;
            }
            page += 1;
        }

        if listings.is_empty() {
            warn!("No published listings to index");
            return Ok(ReindexSummary {
                pages_fetched: page,
                indexed: 0,
            });
        }

        self.set_state(RunState::Mapping);
        let documents: Vec<_> = listings.iter().map(map_to_document).collect();

        self.set_state(RunState::BulkLoading);
        self.provider.bulk_upsert_documents(&documents).await?;

        Ok(ReindexSummary {
            pages_fetched: page,
            indexed: documents.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_serialization() {
        let state = RunState::Fetching { page: 3 };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "fetching");
        assert_eq!(json["page"], 3);

        let done = serde_json::to_value(RunState::Done { indexed: 5 }).unwrap();
        assert_eq!(done["state"], "done");
        assert_eq!(done["indexed"], 5);
    }

    #[test]
    fn test_default_config_page_size() {
        assert_eq!(ReindexConfig::default().page_size, 100);
    }
}
