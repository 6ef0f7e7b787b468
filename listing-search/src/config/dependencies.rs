//! Dependency initialization and wiring for the listing search service.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use listing_search_repository::{IndexConfig, OpenSearchProvider, SearchIndexProvider};

use crate::catalog::HttpCatalogClient;
use crate::config::Settings;
use crate::orchestrator::{ReindexConfig, ReindexOrchestrator};
use crate::server::AppState;
use crate::ServiceError;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from environment variable.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("OPENSEARCH_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Service settings read from the environment.
    pub settings: Settings,
    /// The reindex orchestrator, shared with the HTTP state.
    pub orchestrator: Arc<ReindexOrchestrator>,
    /// State for the HTTP router.
    pub app_state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_NAME`: search index name (default: "listings")
    /// - `CATALOG_SERVICE_URL`: catalog service base URL (default: http://localhost:5001)
    /// - `CATALOG_PAGE_SIZE`: reindex fetch page size (default: 100)
    /// - `REINDEX_STARTUP_DELAY_SECS`: delay before the startup reindex (default: 5)
    /// - `HTTP_TIMEOUT_SECS`: per-request HTTP timeout (default: 120)
    /// - `BIND_ADDRESS`: HTTP bind address (default: 0.0.0.0:8080)
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: retry interval in seconds (default: 15)
    pub async fn new() -> Result<Self, ServiceError> {
        let settings = Settings::from_env();
        let connection_mode = ConnectionMode::from_env();
        let retry_interval = env::var("OPENSEARCH_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);

        info!(
            opensearch_url = %settings.opensearch_url,
            index_name = %settings.index_name,
            catalog_service_url = %settings.catalog_service_url,
            connection_mode = ?connection_mode,
            retry_interval_secs = retry_interval,
            "Initializing dependencies"
        );

        let index_config = IndexConfig::new(settings.index_name.clone());

        let provider: Arc<dyn SearchIndexProvider> = Arc::new(
            Self::connect_to_opensearch(
                &settings.opensearch_url,
                index_config,
                connection_mode,
                Duration::from_secs(retry_interval),
            )
            .await?,
        );

        info!("OpenSearch connection established");

        let catalog = Arc::new(HttpCatalogClient::new(
            settings.catalog_service_url.clone(),
            settings.http_timeout,
        )?);

        let orchestrator = Arc::new(ReindexOrchestrator::with_config(
            catalog,
            provider.clone(),
            ReindexConfig {
                page_size: settings.catalog_page_size,
            },
        ));

        let app_state = AppState {
            provider,
            orchestrator: orchestrator.clone(),
        };

        Ok(Self {
            settings,
            orchestrator,
            app_state,
        })
    }

    /// Connect to OpenSearch with retry logic based on connection mode.
    async fn connect_to_opensearch(
        url: &str,
        index_config: IndexConfig,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearchProvider, ServiceError> {
        loop {
            match OpenSearchProvider::new(url, index_config.clone()).await {
                Ok(provider) => return Ok(provider),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(ServiceError::config(format!(
                            "Failed to connect to OpenSearch: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            opensearch_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to OpenSearch, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
