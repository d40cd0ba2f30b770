//! Integration tests for the submission API
//!
//! These tests drive the full router over a temporary database:
//! - HTTP routing
//! - Request/response handling
//! - Store operations
//! - Error handling

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use formbox::database::Store;
use formbox::route::create_app;
use formbox::state::AppState;

const TOKEN: &str = "test_link_token";

/// Creates a test application over a fresh temporary database
fn setup_test_app() -> (Router, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let store = Store::open(temp_db.path()).expect("Failed to initialize test database");
    let app = create_app(AppState::new(store, Some(TOKEN)));
    (app, temp_db)
}

/// Parses a response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

async fn submit(app: &Router, payload: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/submit")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, response_json(response.into_body()).await)
}

async fn list(app: &Router, query: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/submissions{query}"))
                .header("X-Link-Token", TOKEN)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, response_json(response.into_body()).await)
}

#[tokio::test]
async fn test_submit_success() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = submit(
        &app,
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"].as_str().unwrap().len(), 36);
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_submitted_record_is_listed_first() {
    let (app, _temp_db) = setup_test_app();

    submit(&app, json!({ "name": "Grace" })).await;
    let (status, created) = submit(&app, json!({ "name": "Ada" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = list(&app, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["top"], 50);
    assert_eq!(body["skip"], 0);

    let first = &body["items"][0];
    assert_eq!(first["name"], "Ada");
    assert_eq!(first["id"], created["id"]);
    assert_eq!(first["created_at"], created["created_at"]);
    assert_eq!(body["items"][1]["name"], "Grace");
}

#[tokio::test]
async fn test_submit_trims_and_nulls_blank_fields() {
    let (app, _temp_db) = setup_test_app();

    let (status, _) = submit(
        &app,
        json!({ "name": "  Ada  ", "email": "   ", "message": "  hi  " }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = list(&app, "").await;
    let item = &body["items"][0];
    assert_eq!(item["name"], "Ada");
    assert!(item["email"].is_null());
    assert_eq!(item["message"], "hi");
}

#[tokio::test]
async fn test_submit_empty_name_is_rejected() {
    let (app, _temp_db) = setup_test_app();

    for payload in [
        json!({ "name": "" }),
        json!({ "name": "   \t" }),
        json!({ "email": "a@b.c" }),
        json!({}),
    ] {
        let (status, body) = submit(&app, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name is required.");
        assert_eq!(body["code"], "validation_error");
    }

    let (_, body) = list(&app, "").await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_submit_too_long_name_is_rejected() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = submit(&app, json!({ "name": "x".repeat(201) })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name must be at most 200 characters.");

    let (_, body) = list(&app, "").await;
    assert_eq!(body["count"], 0);
}

async fn post_raw(app: &Router, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri("/api/submit");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    (status, response_json(response.into_body()).await)
}

#[tokio::test]
async fn test_submit_malformed_json_inserts_nothing() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = post_raw(&app, Some("application/json"), "{\"name\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_body");
    assert!(!body["error"].as_str().unwrap().is_empty());

    let (_, body) = list(&app, "").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_submit_wrong_field_type_returns_json_error() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = post_raw(&app, Some("application/json"), r#"{"name": 5}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "invalid_body");
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (_, body) = list(&app, "").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_submit_without_content_type_returns_json_error() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = post_raw(&app, None, r#"{"name": "Ada"}"#).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], "invalid_body");

    let (_, body) = list(&app, "").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_list_clamps_pagination() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = list(&app, "?top=9999&skip=-5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top"], 200);
    assert_eq!(body["skip"], 0);

    let (status, body) = list(&app, "?top=0&skip=99999999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top"], 1);
    assert_eq!(body["skip"], 1_000_000);
}

#[tokio::test]
async fn test_list_repeated_keys_use_first_value() {
    let (app, _temp_db) = setup_test_app();

    for i in 1..=8 {
        submit(&app, json!({ "name": format!("dup{}", i) })).await;
    }

    let (status, body) = list(&app, "?top=5&top=7&skip=1&skip=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top"], 5);
    assert_eq!(body["skip"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["items"][0]["name"], "dup7");

    let (status, body) = list(&app, "?top=999&top=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top"], 200);
}

#[tokio::test]
async fn test_list_non_numeric_falls_back_to_defaults() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = list(&app, "?top=lots&skip=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top"], 50);
    assert_eq!(body["skip"], 0);
}

#[tokio::test]
async fn test_list_pagination() {
    let (app, _temp_db) = setup_test_app();

    for i in 1..=15 {
        submit(&app, json!({ "name": format!("user{}", i) })).await;
    }

    let (_, body) = list(&app, "?top=10&skip=0").await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(body["count"], 15);
    assert_eq!(items[0]["name"], "user15");
    assert_eq!(items[9]["name"], "user6");

    let (_, body) = list(&app, "?top=10&skip=10").await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(body["skip"], 10);
    assert_eq!(items[0]["name"], "user5");
    assert_eq!(items[4]["name"], "user1");

    let (_, body) = list(&app, "?top=10&skip=20").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["count"], 15);
}

#[tokio::test]
async fn test_list_is_stable_without_writes() {
    let (app, _temp_db) = setup_test_app();

    for i in 1..=5 {
        submit(&app, json!({ "name": format!("stable{}", i) })).await;
    }

    let (_, first) = list(&app, "?top=3&skip=1").await;
    let (_, second) = list(&app, "?top=3&skip=1").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_index_page_is_served() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Access required"));
    assert!(html.contains("X-Link-Token"));
}
