//! Core data structures shared across the search service.
//!
//! Re-exports the document model and the search request/response types.

pub mod listing_document;
pub mod search_request;
pub mod search_response;
pub mod translations;

pub use listing_document::{GeoPoint, ListingDocument};
pub use search_request::{GeoFilter, SearchRequest};
pub use search_response::{FacetItem, SearchResponse};
