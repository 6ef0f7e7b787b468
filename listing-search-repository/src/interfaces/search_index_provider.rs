//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch,
//! Elasticsearch, etc.) without touching the orchestrator or the query
//! façade.

use async_trait::async_trait;

use listing_search_shared::{ListingDocument, SearchRequest, SearchResponse};

use crate::errors::SearchIndexError;

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into the orchestrator and the HTTP
/// handlers, which makes testing with mock implementations straightforward
/// and keeps the engine swappable.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error
/// handling across backends.
///
/// # Write semantics
///
/// Every write is a full-document overwrite keyed by the document ID.
/// There is no partial update: indexing an ID that already exists replaces
/// the previous document. Concurrent writers therefore get last-write-wins
/// consistency.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the search index exists, creating it with its field mappings
    /// if absent.
    ///
    /// Idempotent: must succeed when the index already exists. Call during
    /// startup before performing document operations.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Insert or overwrite a single document.
    ///
    /// The document is visible to subsequent searches once this returns.
    async fn upsert_document(&self, document: &ListingDocument) -> Result<(), SearchIndexError>;

    /// Delete a document by ID.
    ///
    /// Deleting an ID that does not exist is not an error.
    async fn delete_document(&self, id: &str) -> Result<(), SearchIndexError>;

    /// Insert or overwrite a batch of documents in one bulk operation.
    ///
    /// The call succeeds only if every submitted document was accepted; any
    /// item-level failure fails the whole call. All accepted documents are
    /// visible to searches by the time this returns. An empty batch is a
    /// no-op.
    async fn bulk_upsert_documents(
        &self,
        documents: &[ListingDocument],
    ) -> Result<(), SearchIndexError>;

    /// Execute a search request and return the matching page plus facets.
    ///
    /// Paging parameters are clamped (`page >= 1`,
    /// `page_size` in `[1, 100]`) before execution. Only published
    /// documents are ever returned.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchIndexError>;
}
