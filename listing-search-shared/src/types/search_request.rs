//! Search request types.
//!
//! This module defines the query parameters accepted by the search façade,
//! including pagination clamping rules.

use serde::{Deserialize, Serialize};

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Hard cap on results per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A geo-radius constraint: only documents within `distance` of the center
/// point are admitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    pub lat: f64,
    pub lon: f64,
    /// Distance with unit, in the engine's format (e.g. "10km", "500m").
    #[serde(default = "default_distance")]
    pub distance: String,
}

fn default_distance() -> String {
    "10km".to_string()
}

/// Search query parameters.
///
/// All filters combine conjunctively (AND); values inside the `categories`
/// and `cities` lists are OR-matched. An empty `query` string skips
/// full-text matching and returns everything the filters admit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query; may be empty.
    #[serde(default)]
    pub query: String,

    /// Category names to filter on (OR-matched).
    #[serde(default)]
    pub categories: Vec<String>,

    /// Cities to filter on (OR-matched).
    #[serde(default)]
    pub cities: Vec<String>,

    /// Optional geo-radius filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoFilter>,

    /// 1-based page number. Values below 1 are clamped to 1.
    #[serde(default = "default_page")]
    pub page: u32,

    /// Page size, clamped to `[1, 100]`.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            cities: Vec::new(),
            geo: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl SearchRequest {
    /// Create a request with the given query text and default paging.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: default_page(),
            page_size: default_page_size(),
            ..Default::default()
        }
    }

    /// The effective page number: at least 1.
    pub fn normalized_page(&self) -> u32 {
        self.page.max(1)
    }

    /// The effective page size: clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn normalized_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// The result offset derived from the clamped paging parameters.
    ///
    /// Widened to `u64`: `page` has no upper bound, so the product does
    /// not fit `u32` for large page numbers.
    pub fn offset(&self) -> u64 {
        (u64::from(self.normalized_page()) - 1) * u64::from(self.normalized_page_size())
    }

    /// Returns true if the free-text portion of the request is blank.
    pub fn is_query_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}
