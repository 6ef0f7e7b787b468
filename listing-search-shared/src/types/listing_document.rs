//! Listing document types for the search index.
//!
//! This module defines the denormalized document structure that is stored
//! in the search engine. Documents are keyed by the source listing's ID, so
//! re-indexing the same listing overwrites the previous document in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, stored as a `geo_point` in the index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new geo point.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Document representation of a published listing in the search index.
///
/// This is the flat, index-resident projection of a catalog listing.
/// Multilingual name/description fields are carried as verbatim JSON blobs
/// so that language selection can happen at read time; the pipeline never
/// parses or re-encodes them.
///
/// # Invariants
///
/// - `id` equals the string form of the source listing's ID and is unique
///   within the index.
/// - `published` is always `true`: unpublished listings are never indexed.
/// - Contact fields are empty strings rather than null, which keeps
///   full-text matching behavior uniform downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingDocument {
    /// Unique document ID (string form of the source listing UUID).
    pub id: String,
    /// Verbatim JSON blob mapping language codes to names.
    pub name_translations: String,
    /// Verbatim JSON blob mapping language codes to descriptions.
    pub description_translations: String,
    /// The listing's category ID.
    pub category_id: String,
    /// Denormalized category display name (facet and filter field).
    pub category_name: String,
    /// City (facet and filter field).
    pub city: String,
    /// Province or region.
    pub province: String,
    /// Composite display address: `"{street}, {city}"`.
    pub address: String,
    /// Geo coordinates of the listing.
    pub location: GeoPoint,
    /// Contact phone; empty string when the source has none.
    pub phone: String,
    /// Contact email; empty string when the source has none.
    pub email: String,
    /// Website URL; empty string when the source has none.
    pub website: String,
    /// Free-form tags, included in full-text matching.
    pub tags: Vec<String>,
    /// Always `true` for indexed documents.
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ListingDocument {
        ListingDocument {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            name_translations: r#"{"en":"Mama's Kitchen","fr":"La Cuisine de Mama"}"#.to_string(),
            description_translations: r#"{"en":"Home cooking"}"#.to_string(),
            category_id: "6ba7b810-9dad-11d1-80b4-00c04fd430c8".to_string(),
            category_name: "food".to_string(),
            city: "Toronto".to_string(),
            province: "Ontario".to_string(),
            address: "12 King St, Toronto".to_string(),
            location: GeoPoint::new(43.65, -79.38),
            phone: String::new(),
            email: "hello@example.com".to_string(),
            website: String::new(),
            tags: vec!["jollof".to_string(), "catering".to_string()],
            published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            published_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_serialization_round_trip() {
        let doc = sample_document();

        let json = serde_json::to_string(&doc).unwrap();
        let deserialized: ListingDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(doc, deserialized);
    }

    #[test]
    fn test_translation_blob_kept_verbatim() {
        let doc = sample_document();
        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();

        // The blob must be serialized as a string, not expanded into an object.
        assert!(json["name_translations"].is_string());
        assert_eq!(
            json["name_translations"].as_str().unwrap(),
            r#"{"en":"Mama's Kitchen","fr":"La Cuisine de Mama"}"#
        );
    }

    #[test]
    fn test_published_at_omitted_when_none() {
        let mut doc = sample_document();
        doc.published_at = None;

        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert!(json.get("published_at").is_none());
    }
}
