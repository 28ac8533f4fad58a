//! JSON API tests against `/api/v1`.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_posts_starts_empty() {
    let (server, _state) = common::spawn().await;

    let response = server.get("/api/v1/posts").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_post_writes_require_token() {
    let (server, _state) = common::spawn().await;

    let response = server
        .post("/api/v1/posts")
        .json(&json!({"title": "Nope", "body": "Nope"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_post_crud_with_bearer_token() {
    let (server, state) = common::spawn().await;
    let token = common::api_session(&state, "apiuser", "secret").await;

    // Create
    let response = server
        .post("/api/v1/posts")
        .authorization_bearer(&token)
        .json(&json!({"title": "Wire post", "body": "Over JSON"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created = response.json::<Value>();
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["title"], "Wire post");

    // Read
    let response = server.get(&format!("/api/v1/posts/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["body"], "Over JSON");

    // Update
    let response = server
        .put(&format!("/api/v1/posts/{}", id))
        .authorization_bearer(&token)
        .json(&json!({"title": "Rewired post"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["title"], "Rewired post");

    // Delete
    let response = server
        .delete(&format!("/api/v1/posts/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/v1/posts/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_post_with_empty_title_is_400() {
    let (server, state) = common::spawn().await;
    let token = common::api_session(&state, "apiuser", "secret").await;

    let response = server
        .post("/api/v1/posts")
        .authorization_bearer(&token)
        .json(&json!({"title": "  ", "body": "Body"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_post_is_structured_404() {
    let (server, _state) = common::spawn().await;

    let response = server.get("/api/v1/posts/42").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_users_expose_only_id_and_username() {
    let (server, state) = common::spawn().await;
    common::api_session(&state, "visible", "secret").await;

    let response = server.get("/api/v1/users").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let users = response.json::<Value>();
    let users = users.as_array().expect("array");
    assert_eq!(users.len(), 1);

    let user = users[0].as_object().expect("object");
    assert_eq!(user.len(), 2);
    assert_eq!(user["username"], "visible");
    assert!(user.contains_key("id"));
    // No email or password material leaks through this endpoint
    assert!(!user.contains_key("email"));
    assert!(!user.contains_key("password_hash"));
}

#[tokio::test]
async fn test_get_user_by_id() {
    let (server, state) = common::spawn().await;
    let token = common::api_session(&state, "lookup", "secret").await;
    let user = state
        .user_service
        .validate_session(&token)
        .await
        .expect("user");

    let response = server.get(&format!("/api/v1/users/{}", user.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["username"], "lookup");

    let response = server.get("/api/v1/users/999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_cookie_works_for_api_writes() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "cookieuser", "secret").await;

    // The browser session cookie doubles as an API credential
    let response = server
        .post("/api/v1/posts")
        .json(&json!({"title": "From the browser", "body": "Same session"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}
