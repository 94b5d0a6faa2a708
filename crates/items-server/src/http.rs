//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use items_core::{CreateItem, Item, ListQuery, Mutation, PatchItem};

use crate::error::ApiError;
use crate::AppState;

/// Response for the health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Response for the item count
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// Response for a bulk delete
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: usize,
}

/// Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: items_core::version(),
    })
}

/// List items through the query pipeline
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Item>> {
    let snapshot = state.store.read().await.list_all();
    let items = query.apply(snapshot);
    tracing::debug!(returned = items.len(), "listed items");
    Json(items)
}

/// Count all items
pub async fn count_items(State(state): State<Arc<AppState>>) -> Json<CountResponse> {
    let count = state.store.read().await.count();
    Json(CountResponse { count })
}

/// Get a single item
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get(&id)?.clone()))
}

/// Create an item
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(request) = body?;
    let item = state.execute(Mutation::Create(request)).await?;
    tracing::info!(id = %item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace every field of an item
pub async fn replace_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<CreateItem>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Json(fields) = body?;
    let item = state.execute(Mutation::Replace { id, fields }).await?;
    Ok(Json(item))
}

/// Merge the supplied fields into an item
pub async fn patch_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<PatchItem>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Json(patch) = body?;
    let item = state.execute(Mutation::Patch { id, patch }).await?;
    Ok(Json(item))
}

/// Copy an item under a new id
pub async fn duplicate_item(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<String>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state.execute(Mutation::Duplicate { source_id }).await?;
    tracing::info!(id = %item.id, "item duplicated");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Delete a single item
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.execute(Mutation::Delete { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every item
pub async fn delete_all_items(State(state): State<Arc<AppState>>) -> Json<DeletedResponse> {
    let deleted = state.store.write().await.clear();
    tracing::info!(deleted, "all items deleted");
    Json(DeletedResponse { deleted })
}
