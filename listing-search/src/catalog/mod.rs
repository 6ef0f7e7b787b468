//! Catalog service client.
//!
//! The catalog service owns the source of truth for listings. This module
//! defines the paginated wire types it returns and the client trait the
//! orchestrator consumes; the HTTP implementation lives in
//! [`http_client`].

mod http_client;
mod records;

pub use http_client::HttpCatalogClient;
pub use records::{CatalogAddress, CatalogListing, CatalogPage};

use async_trait::async_trait;

use crate::errors::SyncError;

/// Client for fetching published listings from the catalog service.
///
/// Implementations must fetch pages exactly as requested and report
/// whether more pages follow; the orchestrator relies on `has_next_page`
/// to decide whether page N+1 is fetched at all.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of published listings.
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `page_size` - number of listings per page
    ///
    /// # Errors
    ///
    /// Returns `SyncError::SourceUnavailable` when the upstream call fails
    /// (non-2xx or transport failure). No retry is attempted here; the
    /// caller decides whether the run aborts.
    async fn fetch_published_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<CatalogPage, SyncError>;
}
