//! Items Server Binary
//!
//! Standalone server for the in-memory item store.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use items_server::{serve, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();

    // Initialize logging; RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let state = Arc::new(AppState::new());
    serve(&config.addr, state).await
}
