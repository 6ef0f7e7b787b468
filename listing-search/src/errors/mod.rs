//! Error types for the synchronization pipeline.

use listing_search_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur while synchronizing listings into the index.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The upstream catalog service could not be reached or returned a
    /// non-success status.
    #[error("Catalog service unavailable: {0}")]
    SourceUnavailable(String),

    /// Error from the search index backend.
    #[error("Search index error: {0}")]
    IndexError(#[from] SearchIndexError),

    /// Error parsing or decoding upstream data.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A reindex run was requested while another one is still active.
    #[error("A reindex run is already in progress")]
    AlreadyRunning,
}

impl SyncError {
    /// Create a source-unavailable error.
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
