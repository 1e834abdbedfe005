// ABOUTME: HTTP request handlers for store operations
// ABOUTME: Handles CRUD operations for stores with database integration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::db::DbState;
use crate::response::ApiError;
use stockroom_inventory::StoreCreateInput;

/// List all stores
pub async fn list_stores(State(db): State<DbState>) -> Result<impl IntoResponse, ApiError> {
    info!("Listing stores");

    let stores = db.store_storage.list_stores().await?;
    Ok((StatusCode::OK, Json(stores)))
}

/// Get a single store by ID
pub async fn get_store(
    State(db): State<DbState>,
    Path(store_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Getting store: {}", store_id);

    let store = db.store_storage.get_store(store_id).await?;
    Ok((StatusCode::OK, Json(store)))
}

/// Request body for creating a store
#[derive(Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
}

/// Create a new store
pub async fn create_store(
    State(db): State<DbState>,
    Json(request): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating store: {}", request.name);

    let input = StoreCreateInput { name: request.name };

    let store = db.store_storage.create_store(input).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// Delete a store and everything it owns
pub async fn delete_store(
    State(db): State<DbState>,
    Path(store_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Deleting store: {}", store_id);

    db.store_storage.delete_store(store_id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Store deleted." }))))
}
