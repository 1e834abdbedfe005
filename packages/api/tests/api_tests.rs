// ABOUTME: Integration tests for the HTTP API routers
// ABOUTME: Drives the full tag lifecycle through oneshot requests

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use stockroom_api::{create_app, DbState};
use tower::ServiceExt;

/// Build the app over an isolated in-memory database
async fn setup_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::migrate!("../storage/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    create_app(DbState::new(pool))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_full_tag_lifecycle() {
    let app = setup_app().await;

    // Create a store
    let (status, store) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let store_id = store["id"].as_i64().unwrap();

    // Create a tag under the store
    let (status, tag) = send(
        &app,
        Method::POST,
        &format!("/store/{store_id}/tags"),
        Some(json!({ "name": "fragile" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tag["name"], "fragile");
    assert_eq!(tag["store_id"], store_id);
    let tag_id = tag["id"].as_i64().unwrap();

    // Same name again is rejected
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/store/{store_id}/tags"),
        Some(json!({ "name": "fragile" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "A tag with that same name already exists in the store"
    );

    // Create an item and link the tag to it
    let (status, item) = send(
        &app,
        Method::POST,
        "/item",
        Some(json!({ "name": "Vase", "price": 12.5, "store_id": store_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = item["id"].as_i64().unwrap();

    let (status, linked) = send(
        &app,
        Method::POST,
        &format!("/item/{item_id}/tag/{tag_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(linked["id"].as_i64().unwrap(), tag_id);

    // Deletion is refused while the tag is linked
    let (status, _) = send(&app, Method::DELETE, &format!("/tags/{tag_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The tag is still retrievable after the refused delete
    let (status, _) = send(&app, Method::GET, &format!("/tags/{tag_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    // Unlink returns both representations
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/item/{item_id}/tag/{tag_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Item removed from tag");
    assert_eq!(body["item"]["id"].as_i64().unwrap(), item_id);
    assert_eq!(body["tag"]["id"].as_i64().unwrap(), tag_id);

    // Now deletion goes through
    let (status, body) = send(&app, Method::DELETE, &format!("/tags/{tag_id}"), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "Tag deleted.");

    // And the tag is gone
    let (status, _) = send(&app, Method::GET, &format!("/tags/{tag_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_tags_for_unknown_store_is_404() {
    let app = setup_app().await;

    // Never an empty 200 for a store that does not exist
    let (status, body) = send(&app, Method::GET, "/store/999/tags", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_store_tags() {
    let app = setup_app().await;

    let (_, store) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    let store_id = store["id"].as_i64().unwrap();

    for name in ["fragile", "heavy"] {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/store/{store_id}/tags"),
            Some(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, tags) = send(&app, Method::GET, &format!("/store/{store_id}/tags"), None).await;
    assert_eq!(status, StatusCode::OK);
    let tags = tags.as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["name"], "fragile");
    assert_eq!(tags[1]["name"], "heavy");
}

#[tokio::test]
async fn test_link_unknown_item_or_tag_is_404() {
    let app = setup_app().await;

    let (_, store) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    let store_id = store["id"].as_i64().unwrap();

    let (_, item) = send(
        &app,
        Method::POST,
        "/item",
        Some(json!({ "name": "Vase", "price": 12.5, "store_id": store_id })),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap();

    let (status, _) = send(&app, Method::POST, "/item/999/tag/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/item/{item_id}/tag/999"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unlink_without_link_is_404() {
    let app = setup_app().await;

    let (_, store) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    let store_id = store["id"].as_i64().unwrap();

    let (_, item) = send(
        &app,
        Method::POST,
        "/item",
        Some(json!({ "name": "Vase", "price": 12.5, "store_id": store_id })),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap();

    let (_, tag) = send(
        &app,
        Method::POST,
        &format!("/store/{store_id}/tags"),
        Some(json!({ "name": "fragile" })),
    )
    .await;
    let tag_id = tag["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/item/{item_id}/tag/{tag_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_item_tags_listing_tracks_links() {
    let app = setup_app().await;

    let (_, store) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    let store_id = store["id"].as_i64().unwrap();

    let (_, item) = send(
        &app,
        Method::POST,
        "/item",
        Some(json!({ "name": "Vase", "price": 12.5, "store_id": store_id })),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap();

    let (_, tag) = send(
        &app,
        Method::POST,
        &format!("/store/{store_id}/tags"),
        Some(json!({ "name": "fragile" })),
    )
    .await;
    let tag_id = tag["id"].as_i64().unwrap();

    // Link twice: the association is a set, so the tag appears once
    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/item/{item_id}/tag/{tag_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, tags) = send(&app, Method::GET, &format!("/item/{item_id}/tags"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tags.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/item/{item_id}/tag/{tag_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, tags) = send(&app, Method::GET, &format!("/item/{item_id}/tags"), None).await;
    assert!(tags.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_store_crud_endpoints() {
    let app = setup_app().await;

    let (status, _) = send(&app, Method::GET, "/store/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, store) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let store_id = store["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, stores) = send(&app, Method::GET, "/store", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stores.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &format!("/store/{store_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Store deleted.");
}

#[tokio::test]
async fn test_item_crud_endpoints() {
    let app = setup_app().await;

    let (_, store) = send(
        &app,
        Method::POST,
        "/store",
        Some(json!({ "name": "Acme" })),
    )
    .await;
    let store_id = store["id"].as_i64().unwrap();

    // Unknown store is rejected before the insert
    let (status, _) = send(
        &app,
        Method::POST,
        "/item",
        Some(json!({ "name": "Vase", "price": 12.5, "store_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, item) = send(
        &app,
        Method::POST,
        "/item",
        Some(json!({ "name": "Vase", "price": 12.5, "store_id": store_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = item["id"].as_i64().unwrap();
    assert_eq!(item["price"].as_f64().unwrap(), 12.5);

    let (status, fetched) = send(&app, Method::GET, &format!("/item/{item_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Vase");

    let (status, body) = send(&app, Method::DELETE, &format!("/item/{item_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted.");

    let (status, _) = send(&app, Method::GET, &format!("/item/{item_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
