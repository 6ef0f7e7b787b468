//! Configuration for the listing search service.
//!
//! Settings are read once from the environment at startup and never
//! re-read.

mod dependencies;

pub use dependencies::{ConnectionMode, Dependencies};

use std::env;
use std::time::Duration;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default catalog service base URL.
const DEFAULT_CATALOG_SERVICE_URL: &str = "http://localhost:5001";

/// Default page size for catalog fetches during reindex.
const DEFAULT_CATALOG_PAGE_SIZE: u32 = 100;

/// Default delay before the startup reindex, giving dependent services
/// time to become reachable.
const DEFAULT_REINDEX_STARTUP_DELAY_SECS: u64 = 5;

/// Default per-request HTTP timeout.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Default bind address for the HTTP server.
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Service settings read from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenSearch server URL (`OPENSEARCH_URL`).
    pub opensearch_url: String,
    /// Search index name (`INDEX_NAME`).
    pub index_name: String,
    /// Catalog service base URL (`CATALOG_SERVICE_URL`).
    pub catalog_service_url: String,
    /// Page size for catalog fetches (`CATALOG_PAGE_SIZE`).
    pub catalog_page_size: u32,
    /// Delay before the startup reindex (`REINDEX_STARTUP_DELAY_SECS`).
    pub reindex_startup_delay: Duration,
    /// Per-request HTTP timeout (`HTTP_TIMEOUT_SECS`).
    pub http_timeout: Duration,
    /// HTTP bind address (`BIND_ADDRESS`).
    pub bind_address: String,
}

impl Settings {
    /// Read settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            opensearch_url: env::var("OPENSEARCH_URL")
                .unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string()),
            index_name: env::var("INDEX_NAME").unwrap_or_else(|_| {
                listing_search_repository::opensearch::DEFAULT_INDEX_NAME.to_string()
            }),
            catalog_service_url: env::var("CATALOG_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_SERVICE_URL.to_string()),
            catalog_page_size: env::var("CATALOG_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CATALOG_PAGE_SIZE),
            reindex_startup_delay: Duration::from_secs(
                env::var("REINDEX_STARTUP_DELAY_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REINDEX_STARTUP_DELAY_SECS),
            ),
            http_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
        }
    }
}
