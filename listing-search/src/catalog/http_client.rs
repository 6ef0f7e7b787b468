//! HTTP implementation of the catalog client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::catalog::{CatalogClient, CatalogPage};
use crate::errors::SyncError;
use crate::ServiceError;

/// Catalog client backed by reqwest.
///
/// Calls the catalog service's published-listings endpoint. A single
/// failed page fetch is reported as `SourceUnavailable`; no retry or
/// backoff happens at this layer.
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    ///
    /// A failure to build the underlying HTTP client is a local
    /// configuration error, not an upstream outage.
    ///
    /// # Arguments
    ///
    /// * `base_url` - base URL of the catalog service, without trailing slash
    /// * `timeout` - per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_published_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<CatalogPage, SyncError> {
        let url = format!("{}/api/business/published", self.base_url);

        debug!(page = page, page_size = page_size, "Fetching published listings");

        let response = self
            .http
            .get(&url)
            .query(&[("page", page), ("pageSize", page_size)])
            .send()
            .await
            .map_err(|e| SyncError::source_unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, page = page, "Catalog service returned non-success status");
            return Err(SyncError::source_unavailable(format!(
                "Published-listings fetch failed with status {}",
                status
            )));
        }

        let body: CatalogPage = response
            .json()
            .await
            .map_err(|e| SyncError::parse(format!("Malformed catalog page: {}", e)))?;

        debug!(
            page = page,
            count = body.items.len(),
            has_next_page = body.has_next_page,
            "Fetched catalog page"
        );

        Ok(body)
    }
}
