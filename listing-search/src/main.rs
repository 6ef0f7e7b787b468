//! Listing Search Service Main Entry Point
//!
//! Serves faceted listing search over HTTP and runs the startup reindex
//! that pulls published listings from the catalog service into OpenSearch.

use dotenv::dotenv;
use listing_search::{server, Dependencies, ServiceError};
use std::env;
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("listing_search=info,listing_search_repository=info")
    });

    let json_logs = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "listing-search",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting listing search service");

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    // Run the full reindex once, after a fixed delay so dependent services
    // have a chance to become reachable. A failed run is logged, not
    // retried; process restart is the recovery path.
    let orchestrator = deps.orchestrator.clone();
    let startup_delay = deps.settings.reindex_startup_delay;
    tokio::spawn(async move {
        sleep(startup_delay).await;
        match orchestrator.run().await {
            Ok(summary) => info!(
                pages_fetched = summary.pages_fetched,
                indexed = summary.indexed,
                "Startup reindex finished"
            ),
            Err(e) => error!(error = %e, "Startup reindex failed"),
        }
    });

    server::run(deps.app_state, &deps.settings.bind_address).await
}
