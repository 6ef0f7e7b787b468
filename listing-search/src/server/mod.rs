//! HTTP server setup and routing.

pub mod handlers;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::ServiceError;

pub use state::AppState;

/// Create the axum application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(handlers::search_handler))
        .route("/api/search/index", post(handlers::index_listing_handler))
        .route("/api/search/:id", delete(handlers::delete_listing_handler))
        .route("/health", get(handlers::health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the listener and serve requests until shutdown.
///
/// Client disconnects abort in-flight handler futures; ctrl-c triggers a
/// graceful shutdown of the listener.
pub async fn run(state: AppState, bind_address: &str) -> Result<(), ServiceError> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .map_err(|e| ServiceError::config(format!("Failed to bind {}: {}", bind_address, e)))?;

    info!(bind_address = %bind_address, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await
        .map_err(|e| ServiceError::config(format!("Server error: {}", e)))
}
