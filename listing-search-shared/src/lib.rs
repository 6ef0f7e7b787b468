//! # Listing Search Shared
//!
//! Shared types for the listing search service: the index-resident
//! document model, search request/response shapes, and the translation
//! blob helper used when rendering multilingual fields.

pub mod types;

pub use types::{
    FacetItem, GeoFilter, GeoPoint, ListingDocument, SearchRequest, SearchResponse,
};
pub use types::translations::resolve_translation;
