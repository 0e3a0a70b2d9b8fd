//! API integration tests, run in-process against the in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use book_api::{api, repository::memory::MemoryStore, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a fresh fixture-seeded store
fn app() -> Router {
    api::router(AppState {
        store: Arc::new(MemoryStore::with_fixtures()),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let body = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_welcome() {
    let (status, body) = send(&app(), "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Welcome to Book API. Try some endpoints, like '/books'.");
}

#[tokio::test]
async fn test_ping() {
    let (status, body) = send(&app(), "GET", "/ping", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"pong");
}

#[tokio::test]
async fn test_list_fixtures() {
    let (status, body) = send_json(&app(), "GET", "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": "1", "title": "Cattedrale", "author": "Carver"},
            {"id": "2", "title": "Uno, nessuno, centomila", "author": "Luigi Pirandello"}
        ])
    );
}

#[tokio::test]
async fn test_create_book() {
    let app = app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/books",
        Some(json!({"title": "Dune", "author": "Herbert"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Herbert");
    let id = body["id"].as_str().expect("No book ID");
    assert!(!id.is_empty());

    let (status, fetched) = send_json(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/books",
        Some(json!({"id": "1", "title": "Dune", "author": "Herbert"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], "1");

    let (_, first) = send_json(&app, "GET", "/books/1", None).await;
    assert_eq!(first["title"], "Cattedrale");
}

#[tokio::test]
async fn test_create_without_body() {
    let (status, body) = send_json(&app(), "POST", "/books", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "Invalid Request.", "error": "missing required Book fields"})
    );
}

#[tokio::test]
async fn test_create_with_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "Invalid Request.");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_missing_book() {
    let (status, body) = send_json(&app(), "GET", "/books/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "Resource not found."}));
}

#[tokio::test]
async fn test_undecodable_id_is_invalid_request() {
    let (status, body) = send_json(&app(), "GET", "/books/%FF", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Invalid Request.");
    assert!(body["error"].as_str().is_some_and(|e| e.contains("book_id")));
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let (status, body) = send_json(
        &app,
        "PUT",
        "/books/1",
        Some(json!({"title": "New Title", "author": "Carver"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "1", "title": "New Title", "author": "Carver"}));

    let (status, fetched) = send_json(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "New Title");
}

#[tokio::test]
async fn test_update_merges_omitted_fields() {
    let app = app();
    let (status, body) = send_json(&app, "PUT", "/books/2", Some(json!({"title": "One, No One"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": "2", "title": "One, No One", "author": "Luigi Pirandello"})
    );
}

#[tokio::test]
async fn test_update_missing_book() {
    let (status, _) = send_json(
        &app(),
        "PUT",
        "/books/999",
        Some(json!({"title": "x", "author": "y"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_body() {
    let (status, body) = send_json(&app(), "PUT", "/books/1", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required Book fields");
}

#[tokio::test]
async fn test_delete_then_get() {
    let app = app();
    let (status, body) = send_json(&app, "DELETE", "/books/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "1", "title": "Cattedrale", "author": "Carver"}));

    let (status, body) = send_json(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "Resource not found."}));
}

#[tokio::test]
async fn test_delete_missing_book() {
    // Unknown ids are rejected by the context middleware, so deletes answer
    // 404 like reads and updates.
    let (status, _) = send_json(&app(), "DELETE", "/books/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_tracks_creates_and_deletes() {
    let app = app();
    for title in ["A", "B", "C"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/books",
            Some(json!({"title": title, "author": "Anon"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    send_json(&app, "DELETE", "/books/2", None).await;

    let (_, body) = send_json(&app, "GET", "/books", None).await;
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 2 + 3 - 1);

    let titles: Vec<&str> = books.iter().filter_map(|b| b["title"].as_str()).collect();
    assert_eq!(titles, vec!["Cattedrale", "A", "B", "C"]);
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, body) = send_json(&app(), "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{book_id}"].is_object());
}
