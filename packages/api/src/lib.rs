// ABOUTME: HTTP API layer for Stockroom providing REST endpoints and routing
// ABOUTME: Integration layer that depends on the domain packages

use axum::{
    routing::{delete, get, post},
    Router,
};

pub mod db;
pub mod health;
pub mod items_handlers;
pub mod response;
pub mod stores_handlers;
pub mod tags_handlers;

pub use db::DbState;

/// Creates the stores API router (nested under /store)
pub fn create_stores_router() -> Router<DbState> {
    Router::new()
        .route("/", get(stores_handlers::list_stores))
        .route("/", post(stores_handlers::create_store))
        .route("/{store_id}", get(stores_handlers::get_store))
        .route("/{store_id}", delete(stores_handlers::delete_store))
        // Store-scoped tag endpoints
        .route("/{store_id}/tags", get(tags_handlers::list_store_tags))
        .route("/{store_id}/tags", post(tags_handlers::create_tag))
}

/// Creates the items API router (nested under /item)
pub fn create_items_router() -> Router<DbState> {
    Router::new()
        .route("/", get(items_handlers::list_items))
        .route("/", post(items_handlers::create_item))
        .route("/{item_id}", get(items_handlers::get_item))
        .route("/{item_id}", delete(items_handlers::delete_item))
        // Tag association endpoints
        .route("/{item_id}/tags", get(tags_handlers::list_item_tags))
        .route("/{item_id}/tag/{tag_id}", post(tags_handlers::link_tag))
        .route(
            "/{item_id}/tag/{tag_id}",
            delete(tags_handlers::unlink_tag),
        )
}

/// Creates the tags API router (nested under /tags)
pub fn create_tags_router() -> Router<DbState> {
    Router::new()
        .route("/{tag_id}", get(tags_handlers::get_tag))
        .route("/{tag_id}", delete(tags_handlers::delete_tag))
}

/// Assemble the full application router over a database state
pub fn create_app(db: DbState) -> Router {
    Router::new()
        .nest("/store", create_stores_router())
        .nest("/item", create_items_router())
        .nest("/tags", create_tags_router())
        .route("/health", get(health::health_check))
        .with_state(db)
}
