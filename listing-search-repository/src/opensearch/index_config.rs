//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and field mappings for the
//! listing search index.

use serde_json::{json, Value};

/// Default name of the listings index.
pub const DEFAULT_INDEX_NAME: &str = "listings";

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index name used for all operations.
    pub name: String,
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

/// Get the index settings and mappings for the listing search index.
///
/// The configuration includes:
/// - **text** fields for the translation blobs and tags, the full-text
///   match surface;
/// - **keyword** fields for `category_name` and `city`, used by both the
///   terms filters and the facet aggregations;
/// - a **geo_point** `location` field for geo-radius filtering;
/// - contact fields stored but not indexed.
pub fn index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "keyword"
                },
                "name_translations": {
                    "type": "text"
                },
                "description_translations": {
                    "type": "text"
                },
                "category_id": {
                    "type": "keyword"
                },
                "category_name": {
                    "type": "keyword"
                },
                "city": {
                    "type": "keyword"
                },
                "province": {
                    "type": "keyword"
                },
                "address": {
                    "type": "text"
                },
                "location": {
                    "type": "geo_point"
                },
                "phone": {
                    "type": "keyword",
                    "index": false
                },
                "email": {
                    "type": "keyword",
                    "index": false
                },
                "website": {
                    "type": "keyword",
                    "index": false
                },
                "tags": {
                    "type": "text",
                    "fields": {
                        "raw": {
                            "type": "keyword"
                        }
                    }
                },
                "published": {
                    "type": "boolean"
                },
                "created_at": {
                    "type": "date"
                },
                "updated_at": {
                    "type": "date"
                },
                "published_at": {
                    "type": "date"
                }
            }
        }
    })
}
