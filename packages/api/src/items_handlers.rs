// ABOUTME: HTTP request handlers for item operations
// ABOUTME: Handles CRUD operations for items with database integration

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
use stockroom_inventory::ItemCreateInput;

/// List all items
pub async fn list_items(State(db): State<DbState>) -> Result<impl IntoResponse, ApiError> {
    info!("Listing items");

    let items = db.item_storage.list_items().await?;
    Ok((StatusCode::OK, Json(items)))
}

/// Get a single item by ID
pub async fn get_item(
    State(db): State<DbState>,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Getting item: {}", item_id);

    let item = db.item_storage.get_item(item_id).await?;
    Ok((StatusCode::OK, Json(item)))
}

/// Request body for creating an item
#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}

/// Create a new item under an existing store
pub async fn create_item(
    State(db): State<DbState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "Creating item '{}' for store: {}",
        request.name, request.store_id
    );

    let input = ItemCreateInput {
        name: request.name,
        price: request.price,
        store_id: request.store_id,
    };

    let item = db.item_storage.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Delete an item
pub async fn delete_item(
    State(db): State<DbState>,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Deleting item: {}", item_id);

    db.item_storage.delete_item(item_id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Item deleted." }))))
}
