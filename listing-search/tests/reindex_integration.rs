//! Integration tests for the reindex orchestrator.
//!
//! These tests use the real `ReindexOrchestrator` with mock dependencies
//! (`CatalogClient` and `SearchIndexProvider`) to pin down the run's
//! control flow: sequential page fetches, exactly one bulk load, and
//! all-or-nothing failure semantics.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use listing_search::catalog::{CatalogAddress, CatalogClient, CatalogListing, CatalogPage};
use listing_search::errors::SyncError;
use listing_search::orchestrator::{ReindexOrchestrator, RunState};
use listing_search_repository::{SearchIndexError, SearchIndexProvider};
use listing_search_shared::{ListingDocument, SearchRequest, SearchResponse};

fn listing(name: &str) -> CatalogListing {
    CatalogListing {
        id: Uuid::new_v4(),
        name_translations: format!(r#"{{"en":"{}"}}"#, name),
        description_translations: "{}".to_string(),
        category_id: Uuid::new_v4(),
        category_name: "food".to_string(),
        address: CatalogAddress {
            street: "12 King St".to_string(),
            city: "Toronto".to_string(),
            province: "Ontario".to_string(),
            postal_code: "M5H 1A1".to_string(),
            country: "Canada".to_string(),
            latitude: 43.65,
            longitude: -79.38,
        },
        phone: None,
        email: None,
        website: None,
        tags: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
        published_at: Some(Utc::now()),
    }
}

fn page(names: &[&str], has_next_page: bool) -> CatalogPage {
    CatalogPage {
        items: names.iter().map(|n| listing(n)).collect(),
        total_count: names.len() as u64,
        page: 0,
        page_size: names.len() as u32,
        has_next_page,
    }
}

/// Mock catalog client serving a scripted sequence of pages.
struct MockCatalogClient {
    pages: Vec<Result<CatalogPage, String>>,
    fetched_pages: Mutex<Vec<u32>>,
}

impl MockCatalogClient {
    fn new(pages: Vec<Result<CatalogPage, String>>) -> Self {
        Self {
            pages,
            fetched_pages: Mutex::new(Vec::new()),
        }
    }

    fn fetched_pages(&self) -> Vec<u32> {
        self.fetched_pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn fetch_published_page(
        &self,
        page: u32,
        _page_size: u32,
    ) -> Result<CatalogPage, SyncError> {
        self.fetched_pages.lock().unwrap().push(page);

        match self.pages.get((page - 1) as usize) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(msg)) => Err(SyncError::source_unavailable(msg.clone())),
            None => Err(SyncError::source_unavailable(format!(
                "Unexpected fetch of page {}",
                page
            ))),
        }
    }
}

/// Mock catalog client that blocks until released, for re-entrancy tests.
struct BlockingCatalogClient {
    release: Notify,
}

#[async_trait]
impl CatalogClient for BlockingCatalogClient {
    async fn fetch_published_page(
        &self,
        _page: u32,
        _page_size: u32,
    ) -> Result<CatalogPage, SyncError> {
        self.release.notified().await;
        Ok(CatalogPage::empty())
    }
}

/// Mock search provider recording every write.
struct MockSearchProvider {
    bulk_calls: Mutex<Vec<Vec<ListingDocument>>>,
    fail_ensure_index: bool,
    fail_bulk: bool,
}

impl MockSearchProvider {
    fn new() -> Self {
        Self {
            bulk_calls: Mutex::new(Vec::new()),
            fail_ensure_index: false,
            fail_bulk: false,
        }
    }

    fn failing_ensure_index() -> Self {
        Self {
            fail_ensure_index: true,
            ..Self::new()
        }
    }

    fn failing_bulk() -> Self {
        Self {
            fail_bulk: true,
            ..Self::new()
        }
    }

    fn bulk_calls(&self) -> Vec<Vec<ListingDocument>> {
        self.bulk_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndexProvider for MockSearchProvider {
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        if self.fail_ensure_index {
            Err(SearchIndexError::index_creation("mock failure"))
        } else {
            Ok(())
        }
    }

    async fn upsert_document(&self, _document: &ListingDocument) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn delete_document(&self, _id: &str) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn bulk_upsert_documents(
        &self,
        documents: &[ListingDocument],
    ) -> Result<(), SearchIndexError> {
        if self.fail_bulk {
            return Err(SearchIndexError::bulk_index("mock bulk failure"));
        }
        self.bulk_calls.lock().unwrap().push(documents.to_vec());
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchIndexError> {
        Ok(SearchResponse::empty(
            request.normalized_page(),
            request.normalized_page_size(),
        ))
    }
}

#[tokio::test]
async fn three_pages_are_fetched_in_order_then_bulk_loaded_once() {
    let catalog = Arc::new(MockCatalogClient::new(vec![
        Ok(page(&["a", "b"], true)),
        Ok(page(&["c", "d"], true)),
        Ok(page(&["e"], false)),
    ]));
    let provider = Arc::new(MockSearchProvider::new());
    let orchestrator = ReindexOrchestrator::new(catalog.clone(), provider.clone());

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(catalog.fetched_pages(), vec![1, 2, 3]);
    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.indexed, 5);

    let bulk_calls = provider.bulk_calls();
    assert_eq!(bulk_calls.len(), 1, "exactly one bulk load expected");
    assert_eq!(bulk_calls[0].len(), 5);

    assert_eq!(orchestrator.state(), RunState::Done { indexed: 5 });
}

#[tokio::test]
async fn bulk_documents_carry_mapped_fields() {
    let catalog = Arc::new(MockCatalogClient::new(vec![Ok(page(&["a"], false))]));
    let provider = Arc::new(MockSearchProvider::new());
    let orchestrator = ReindexOrchestrator::new(catalog, provider.clone());

    orchestrator.run().await.unwrap();

    let bulk_calls = provider.bulk_calls();
    let document = &bulk_calls[0][0];
    assert!(document.published);
    assert_eq!(document.address, "12 King St, Toronto");
    assert_eq!(document.city, "Toronto");
    assert_eq!(document.phone, "");
    assert!(Uuid::parse_str(&document.id).is_ok());
}

#[tokio::test]
async fn first_page_failure_aborts_the_run_without_bulk() {
    let catalog = Arc::new(MockCatalogClient::new(vec![Err("boom".to_string())]));
    let provider = Arc::new(MockSearchProvider::new());
    let orchestrator = ReindexOrchestrator::new(catalog, provider.clone());

    let result = orchestrator.run().await;

    assert!(matches!(result, Err(SyncError::SourceUnavailable(_))));
    assert!(provider.bulk_calls().is_empty());
    assert!(matches!(orchestrator.state(), RunState::Failed { .. }));
}

#[tokio::test]
async fn later_page_failure_discards_earlier_pages() {
    let catalog = Arc::new(MockCatalogClient::new(vec![
        Ok(page(&["a", "b"], true)),
        Err("boom".to_string()),
    ]));
    let provider = Arc::new(MockSearchProvider::new());
    let orchestrator = ReindexOrchestrator::new(catalog.clone(), provider.clone());

    let result = orchestrator.run().await;

    assert!(result.is_err());
    assert_eq!(catalog.fetched_pages(), vec![1, 2]);
    // All-or-nothing: page 1's records are discarded, nothing is indexed.
    assert!(provider.bulk_calls().is_empty());
}

#[tokio::test]
async fn empty_source_finishes_without_bulk_load() {
    let catalog = Arc::new(MockCatalogClient::new(vec![Ok(page(&[], false))]));
    let provider = Arc::new(MockSearchProvider::new());
    let orchestrator = ReindexOrchestrator::new(catalog, provider.clone());

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.indexed, 0);
    assert!(provider.bulk_calls().is_empty());
    assert_eq!(orchestrator.state(), RunState::Done { indexed: 0 });
}

#[tokio::test]
async fn index_creation_failure_aborts_before_any_fetch() {
    let catalog = Arc::new(MockCatalogClient::new(vec![Ok(page(&["a"], false))]));
    let provider = Arc::new(MockSearchProvider::failing_ensure_index());
    let orchestrator = ReindexOrchestrator::new(catalog.clone(), provider.clone());

    let result = orchestrator.run().await;

    assert!(matches!(result, Err(SyncError::IndexError(_))));
    assert!(catalog.fetched_pages().is_empty());
    assert!(provider.bulk_calls().is_empty());
}

#[tokio::test]
async fn bulk_failure_ends_run_in_failed_state() {
    let catalog = Arc::new(MockCatalogClient::new(vec![Ok(page(&["a"], false))]));
    let provider = Arc::new(MockSearchProvider::failing_bulk());
    let orchestrator = ReindexOrchestrator::new(catalog, provider);

    let result = orchestrator.run().await;

    assert!(matches!(result, Err(SyncError::IndexError(_))));
    assert!(matches!(orchestrator.state(), RunState::Failed { .. }));
}

#[tokio::test]
async fn second_run_is_rejected_while_one_is_active() {
    let catalog = Arc::new(BlockingCatalogClient {
        release: Notify::new(),
    });
    let provider = Arc::new(MockSearchProvider::new());
    let orchestrator = Arc::new(ReindexOrchestrator::new(catalog.clone(), provider));

    let first = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.run().await })
    };

    // Let the first run reach the blocking fetch.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(matches!(orchestrator.state(), RunState::Fetching { page: 1 }));

    let second = orchestrator.run().await;
    assert!(matches!(second, Err(SyncError::AlreadyRunning)));

    catalog.release.notify_one();
    let first_result = first.await.unwrap();
    assert!(first_result.is_ok());

    // With the first run finished, a new run is accepted again.
    catalog.release.notify_one();
    let rerun = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.run().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    catalog.release.notify_one();
    assert!(rerun.await.unwrap().is_ok());
}
