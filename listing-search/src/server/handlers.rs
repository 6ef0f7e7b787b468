//! HTTP request handlers.
//!
//! The search handler is a thin façade over the index provider: it carries
//! no business logic of its own and only translates provider errors into
//! boundary responses. Internal failure detail stays in the server-side
//! logs; clients get an opaque message plus a correlation ID.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use listing_search_shared::{ListingDocument, SearchRequest};

use crate::server::state::AppState;

/// Health check endpoint, reporting the current reindex run state.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "reindex": state.orchestrator.state(),
        })),
    )
}

/// Execute a search request.
pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    match state.provider.search(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            let correlation_id = Uuid::new_v4();
            error!(
                correlation_id = %correlation_id,
                error = %e,
                "Search request failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Search failed",
                    "correlation_id": correlation_id,
                })),
            )
                .into_response()
        }
    }
}

/// Index (insert or overwrite) a single listing document.
///
/// Used by event-driven lifecycle updates, e.g. a listing being published
/// after the startup reindex completed.
pub async fn index_listing_handler(
    State(state): State<AppState>,
    Json(document): Json<ListingDocument>,
) -> impl IntoResponse {
    let doc_id = document.id.clone();

    match state.provider.upsert_document(&document).await {
        Ok(()) => {
            info!(doc_id = %doc_id, "Listing indexed");
            (
                StatusCode::OK,
                Json(json!({ "message": "Listing indexed successfully" })),
            )
                .into_response()
        }
        Err(e) => {
            let correlation_id = Uuid::new_v4();
            error!(
                correlation_id = %correlation_id,
                doc_id = %doc_id,
                error = %e,
                "Failed to index listing"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Index failed",
                    "correlation_id": correlation_id,
                })),
            )
                .into_response()
        }
    }
}

/// Remove a single listing document by ID.
///
/// Removing an ID that is not indexed still succeeds.
pub async fn delete_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.provider.delete_document(&id).await {
        Ok(()) => {
            info!(doc_id = %id, "Listing removed from index");
            (
                StatusCode::OK,
                Json(json!({ "message": "Listing deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => {
            let correlation_id = Uuid::new_v4();
            error!(
                correlation_id = %correlation_id,
                doc_id = %id,
                error = %e,
                "Failed to delete listing"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Delete failed",
                    "correlation_id": correlation_id,
                })),
            )
                .into_response()
        }
    }
}
