//! Items Server - HTTP surface for the in-memory item store
//!
//! JSON endpoints for creating, reading, replacing, patching, duplicating,
//! deleting and listing items.

pub mod config;
pub mod error;
pub mod http;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use items_core::{Item, ItemStore, Mutation};

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared application state
pub struct AppState {
    pub store: RwLock<ItemStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(ItemStore::new()),
        }
    }

    /// Run a command while holding the store's write lock for its duration
    pub async fn execute(&self, mutation: Mutation) -> items_core::Result<Item> {
        let mut store = self.store.write().await;
        mutation.execute(&mut store).map(|outcome| outcome.into_item())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // System endpoints
        .route("/health", get(http::health))
        // Item collection
        .route("/items", get(http::list_items))
        .route("/items", post(http::create_item))
        .route("/items", delete(http::delete_all_items))
        .route("/items/count", get(http::count_items))
        // Single item
        .route("/items/{id}", get(http::get_item))
        .route("/items/{id}", put(http::replace_item))
        .route("/items/{id}", patch(http::patch_item))
        .route("/items/{id}", delete(http::delete_item))
        .route("/items/{id}/duplicate", post(http::duplicate_item))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server and run until ctrl-c
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Items server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Items server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
