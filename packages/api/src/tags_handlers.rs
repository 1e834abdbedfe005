// ABOUTME: HTTP request handlers for tag operations
// ABOUTME: Store-scoped listing/creation, item linking, retrieval and guarded delete

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
use stockroom_tags::TagCreateInput;

/// List all tags owned by a store
pub async fn list_store_tags(
    State(db): State<DbState>,
    Path(store_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing tags for store: {}", store_id);

    let tags = db.tag_storage.list_tags_for_store(store_id).await?;
    Ok((StatusCode::OK, Json(tags)))
}

/// Request body for creating a tag
#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// Create a new tag under a store
pub async fn create_tag(
    State(db): State<DbState>,
    Path(store_id): Path<i64>,
    Json(request): Json<CreateTagRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating tag '{}' for store: {}", request.name, store_id);

    let input = TagCreateInput { name: request.name };

    let tag = db.tag_storage.create_tag(store_id, input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Get a single tag by ID
pub async fn get_tag(
    State(db): State<DbState>,
    Path(tag_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Getting tag: {}", tag_id);

    let tag = db.tag_storage.get_tag(tag_id).await?;
    Ok((StatusCode::OK, Json(tag)))
}

/// Delete a tag, refused while any item is still linked to it
pub async fn delete_tag(
    State(db): State<DbState>,
    Path(tag_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Deleting tag: {}", tag_id);

    db.tag_storage.delete_tag(tag_id).await?;
    Ok((StatusCode::ACCEPTED, Json(json!({ "message": "Tag deleted." }))))
}

/// List all tags linked to an item
pub async fn list_item_tags(
    State(db): State<DbState>,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing tags for item: {}", item_id);

    let tags = db.tag_storage.list_tags_for_item(item_id).await?;
    Ok((StatusCode::OK, Json(tags)))
}

/// Link a tag to an item.
/// Returns 201 with the tag; the status code is part of the published
/// contract even though the operation is not strictly a creation.
pub async fn link_tag(
    State(db): State<DbState>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Linking tag {} to item {}", tag_id, item_id);

    let tag = db.tag_storage.link_tag(item_id, tag_id).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Unlink a tag from an item, returning both representations
pub async fn unlink_tag(
    State(db): State<DbState>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Unlinking tag {} from item {}", tag_id, item_id);

    let item = db.item_storage.get_item(item_id).await?;
    let tag = db.tag_storage.get_tag(tag_id).await?;

    db.tag_storage.unlink_tag(item_id, tag_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Item removed from tag",
            "item": item,
            "tag": tag,
        })),
    ))
}
