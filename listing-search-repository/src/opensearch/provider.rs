//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of
//! `SearchIndexProvider` using the OpenSearch Rust crate. Query bodies are
//! built as plain JSON so the construction logic stays testable without a
//! running cluster.

use std::collections::HashMap;

use async_trait::async_trait;
use opensearch::http::request::JsonBody;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::http::StatusCode;
use opensearch::indices::{IndicesCreateParts, IndicesExistsParts};
use opensearch::params::Refresh;
use opensearch::{BulkParts, DeleteParts, IndexParts, OpenSearch, SearchParts};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use listing_search_shared::{FacetItem, ListingDocument, SearchRequest, SearchResponse};

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{index_settings, IndexConfig};

/// Number of buckets requested per facet aggregation.
const FACET_SIZE: u32 = 50;

/// Boost applied to the name field in full-text matching.
const NAME_BOOST: &str = "name_translations^2";

/// OpenSearch provider implementation.
///
/// Provides full-text, filtered and geo-aware search over listing
/// documents using OpenSearch as the backend.
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration containing the index name
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Build the bool query for a search request.
    ///
    /// All clauses are conjunctive. The full-text clause is a fuzzy
    /// `multi_match` over the name blob (boosted), description blob and
    /// tags with best-fields combination, added only when the query text is
    /// non-blank. An unconditional `published == true` term keeps anything
    /// that slipped into the index unpublished out of results.
    fn build_query_body(request: &SearchRequest) -> Value {
        let mut must: Vec<Value> = Vec::new();

        if !request.is_query_blank() {
            must.push(json!({
                "multi_match": {
                    "query": request.query,
                    "fields": [NAME_BOOST, "description_translations", "tags"],
                    "type": "best_fields",
                    "fuzziness": "AUTO"
                }
            }));
        }

        if !request.categories.is_empty() {
            must.push(json!({
                "terms": { "category_name": request.categories }
            }));
        }

        if !request.cities.is_empty() {
            must.push(json!({
                "terms": { "city": request.cities }
            }));
        }

        if let Some(ref geo) = request.geo {
            must.push(json!({
                "geo_distance": {
                    "distance": geo.distance,
                    "location": { "lat": geo.lat, "lon": geo.lon }
                }
            }));
        }

        must.push(json!({ "term": { "published": true } }));

        json!({
            "query": { "bool": { "must": must } },
            "aggs": {
                "categories": {
                    "terms": { "field": "category_name", "size": FACET_SIZE }
                },
                "cities": {
                    "terms": { "field": "city", "size": FACET_SIZE }
                }
            }
        })
    }

    /// Extract facet buckets from the aggregations section of an engine
    /// response. Missing aggregations yield an empty facet list rather
    /// than an error.
    fn extract_facets(body: &Value) -> HashMap<String, Vec<FacetItem>> {
        let mut facets = HashMap::new();

        for facet_name in ["categories", "cities"] {
            if let Some(buckets) = body["aggregations"][facet_name]["buckets"].as_array() {
                let items = buckets
                    .iter()
                    .filter_map(|bucket| {
                        let key = bucket["key"].as_str()?;
                        let count = bucket["doc_count"].as_u64().unwrap_or(0);
                        Some(FacetItem {
                            key: key.to_string(),
                            count,
                        })
                    })
                    .collect();
                facets.insert(facet_name.to_string(), items);
            }
        }

        facets
    }

    /// Whether a delete response status completes the operation. A 404
    /// means the document was already absent, which the delete contract
    /// treats as success.
    fn delete_status_acceptable(status: StatusCode) -> bool {
        status.is_success() || status == StatusCode::NOT_FOUND
    }

    /// Shape a raw engine response body into a `SearchResponse`.
    fn parse_search_body(
        body: &Value,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse, SearchIndexError> {
        let total_results = body["hits"]["total"]["value"]
            .as_u64()
            .or_else(|| body["hits"]["total"].as_u64())
            .unwrap_or(0);

        let hits = body["hits"]["hits"].as_array().cloned().unwrap_or_default();

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let document: ListingDocument = serde_json::from_value(hit["_source"].clone())
                .map_err(|e| {
                    SearchIndexError::parse(format!("Malformed document in search hit: {}", e))
                })?;
            results.push(document);
        }

        Ok(SearchResponse {
            results,
            total_results,
            page,
            page_size,
            facets: Self::extract_facets(body),
        })
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let index = self.index_config.name.as_str();

        let exists_response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if exists_response.status_code().is_success() {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another writer may have created the index between the exists
            // check and the create call.
            if error_body.contains("resource_already_exists_exception") {
                debug!(index = %index, "Index was created concurrently");
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created search index");
        Ok(())
    }

    async fn upsert_document(&self, document: &ListingDocument) -> Result<(), SearchIndexError> {
        let body =
            serde_json::to_value(document).map_err(|e| SearchIndexError::serialization(e.to_string()))?;

        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.name, &document.id))
            .body(body)
            .refresh(Refresh::True)
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %document.id, "Document indexed");
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_config.name, id))
            .refresh(Refresh::True)
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let status = response.status_code();
        if !Self::delete_status_acceptable(status) {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchIndexError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, "Document deleted");
        Ok(())
    }

    async fn bulk_upsert_documents(
        &self,
        documents: &[ListingDocument],
    ) -> Result<(), SearchIndexError> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(json!({ "index": { "_id": document.id } }).into());
            let source = serde_json::to_value(document)
                .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
            body.push(source.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.name))
            .body(body)
            .refresh(Refresh::True)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        // Any item-level failure fails the whole call; the caller treats the
        // batch as all-or-nothing.
        if response_body["errors"].as_bool().unwrap_or(false) {
            let first_error = response_body["items"]
                .as_array()
                .and_then(|items| {
                    items.iter().find_map(|item| {
                        item["index"]["error"]["reason"].as_str().map(String::from)
                    })
                })
                .unwrap_or_else(|| "unknown item failure".to_string());
            error!(reason = %first_error, "Bulk upsert reported item failures");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk upsert had item failures: {}",
                first_error
            )));
        }

        debug!(count = documents.len(), "Bulk upsert complete");
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchIndexError> {
        let page = request.normalized_page();
        let page_size = request.normalized_page_size();
        let body = Self::build_query_body(request);

        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.name.as_str()]))
            .from(request.offset() as i64)
            .size(page_size as i64)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Self::parse_search_body(&response_body, page, page_size)
    }
}
