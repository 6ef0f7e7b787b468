//! # Listing Search Service
//!
//! Search service for the merchant directory - pulls published listings
//! from the catalog service and indexes them into OpenSearch, then serves
//! faceted, geo-aware queries over HTTP.
//!
//! ## Architecture
//!
//! The service follows a fetch-map-load pattern driven once at startup:
//!
//! 1. **Catalog client**: pages through published listings from the
//!    catalog service
//! 2. **Mapper**: flattens listings into search documents
//! 3. **Orchestrator**: drives the full reindex and owns its run state
//! 4. **Server**: the query façade plus single-document sync endpoints
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`catalog`]: HTTP client for the catalog service
//! - [`mapper`]: Maps catalog listings to search documents
//! - [`orchestrator`]: Drives the startup reindex
//! - [`server`]: axum router and request handlers
//! - [`errors`]: Error types for the synchronization pipeline

pub mod catalog;
pub mod config;
pub mod errors;
pub mod mapper;
pub mod orchestrator;
pub mod server;

pub use config::Dependencies;
pub use errors::SyncError;

use thiserror::Error;

/// Errors that can occur during service initialization or execution.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Synchronization pipeline error.
    #[error("Sync error: {0}")]
    SyncError(#[from] SyncError),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
