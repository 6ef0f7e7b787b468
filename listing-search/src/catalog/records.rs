//! Wire types returned by the catalog service.
//!
//! The catalog service serializes with camelCase field names; these types
//! mirror that envelope exactly. The pipeline treats them as read-only
//! input.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Address of a listing as the catalog service returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A published listing as returned by the catalog service.
///
/// `name_translations` and `description_translations` are JSON blobs
/// mapping language codes to strings; they are carried verbatim and never
/// parsed by the pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing {
    pub id: Uuid,
    #[serde(default)]
    pub name_translations: String,
    #[serde(default)]
    pub description_translations: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub category_name: String,
    pub address: CatalogAddress,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// One page of the catalog service's paginated listings envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    #[serde(default)]
    pub items: Vec<CatalogListing>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub has_next_page: bool,
}

impl CatalogPage {
    /// An empty page with no follow-up page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: 1,
            page_size: 0,
            has_next_page: false,
        }
    }
}
