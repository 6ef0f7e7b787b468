//! Search response types.
//!
//! This module defines the response shape returned from search operations:
//! the ranked result page, the total match count, and facet buckets computed
//! over the entire matched set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::ListingDocument;

/// One facet bucket: a distinct field value and the number of matching
/// documents carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetItem {
    pub key: String,
    pub count: u64,
}

/// Complete search response with results, paging metadata and facets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matched documents in engine-ranked order.
    pub results: Vec<ListingDocument>,

    /// Total number of matching documents, independent of page size.
    pub total_results: u64,

    /// Echo of the (clamped) page number that produced `results`.
    pub page: u32,

    /// Echo of the (clamped) page size.
    pub page_size: u32,

    /// Facet buckets keyed by facet name (`categories`, `cities`), each
    /// covering the top values across all matches, not just this page.
    pub facets: HashMap<String, Vec<FacetItem>>,
}

impl SearchResponse {
    /// An empty response for the given paging parameters.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            results: Vec::new(),
            total_results: 0,
            page,
            page_size,
            facets: HashMap::new(),
        }
    }

    /// Returns true if there are no results on this page.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of results on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }
}
