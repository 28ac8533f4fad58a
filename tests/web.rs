//! HTML flow tests: browser-style form submissions against the full
//! router.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;

#[tokio::test]
async fn test_home_page_renders_post_list() {
    let (server, state) = common::spawn().await;

    let token = common::api_session(&state, "writer", "secret").await;
    let user = state
        .user_service
        .validate_session(&token)
        .await
        .expect("user");
    state
        .post_service
        .create(
            gazette::models::CreatePostInput {
                title: "First post".into(),
                body: "Hello there".into(),
            },
            user.id,
        )
        .await
        .expect("post");

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Latest posts"));
    assert!(html.contains("First post"));
}

#[tokio::test]
async fn test_about_page_renders() {
    let (server, _state) = common::spawn().await;

    let response = server.get("/about/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("About"));
}

#[tokio::test]
async fn test_post_detail_renders_and_missing_is_404() {
    let (server, state) = common::spawn().await;

    let token = common::api_session(&state, "writer", "secret").await;
    let user = state
        .user_service
        .validate_session(&token)
        .await
        .expect("user");
    let post = state
        .post_service
        .create(
            gazette::models::CreatePostInput {
                title: "Readable".into(),
                body: "Content".into(),
            },
            user.id,
        )
        .await
        .expect("post");

    let response = server.get(&format!("/blog/{}/", post.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Readable"));

    let response = server.get("/blog/999/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signup_redirects_to_login() {
    let (server, _state) = common::spawn().await;

    let response = server
        .post("/accounts/signup/")
        .form(&[
            ("username", "newuser"),
            ("email", "newuser@example.com"),
            ("password", "secret"),
            ("age", "30"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/accounts/login/");
}

#[tokio::test]
async fn test_signup_with_taken_username_rerenders_form() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "taken", "secret").await;

    let response = server
        .post("/accounts/signup/")
        .form(&[
            ("username", "taken"),
            ("email", "other@example.com"),
            ("password", "secret"),
            ("age", ""),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("already taken"));
}

#[tokio::test]
async fn test_login_sets_session_and_nav_shows_username() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "alice", "secret").await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("alice"));
}

#[tokio::test]
async fn test_login_with_wrong_password_rerenders_form() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "bob", "secret").await;

    let response = server
        .post("/accounts/login/")
        .form(&[("username", "bob"), ("password", "wrong")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Invalid username or password"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "carol", "secret").await;

    let response = server.post("/accounts/logout/").await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/");

    // The protected new-post form bounces back to login now
    let response = server.get("/blog/new/").await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/accounts/login/");
}

#[tokio::test]
async fn test_new_post_requires_login() {
    let (server, _state) = common::spawn().await;

    let response = server.get("/blog/new/").await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/accounts/login/");

    let response = server
        .post("/blog/new/")
        .form(&[("title", "Sneaky"), ("body", "Nope")])
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/accounts/login/");
}

#[tokio::test]
async fn test_create_post_redirects_and_persists() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "dave", "secret").await;

    let response = server
        .post("/blog/new/")
        .form(&[("title", "Fresh post"), ("body", "Some words")])
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);

    let location = response.header("location");
    let location = location.to_str().expect("location");
    let response = server.get(location).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Fresh post"));
}

#[tokio::test]
async fn test_create_post_with_empty_title_rerenders_form() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "erin", "secret").await;

    let response = server
        .post("/blog/new/")
        .form(&[("title", "  "), ("body", "Body")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Title must not be empty"));
    assert!(html.contains("Body"));
}

#[tokio::test]
async fn test_update_post_redirects_and_reflects() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "frank", "secret").await;
    let response = server
        .post("/blog/new/")
        .form(&[("title", "Before"), ("body", "Body")])
        .await;
    let location = response.header("location");
    let detail_url = location.to_str().expect("location").to_string();

    let response = server
        .post(&format!("{}update/", detail_url))
        .form(&[("title", "After"), ("body", "Body")])
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), detail_url.as_str());

    let response = server.get(&detail_url).await;
    let html = response.text();
    assert!(html.contains("After"));
    assert!(!html.contains("Before"));
}

#[tokio::test]
async fn test_delete_post_redirects_home() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "grace", "secret").await;
    let response = server
        .post("/blog/new/")
        .form(&[("title", "Short lived"), ("body", "Body")])
        .await;
    let location = response.header("location");
    let detail_url = location.to_str().expect("location").to_string();

    let response = server.post(&format!("{}delete/", detail_url)).await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "/");

    let response = server.get(&detail_url).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_article_comment_flow() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "author", "secret").await;
    let response = server
        .post("/articles/new/")
        .form(&[("title", "Big news"), ("body", "Details")])
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    let location = response.header("location");
    let detail_url = location.to_str().expect("location").to_string();

    let response = server
        .post(&detail_url)
        .form(&[("body", "Great reporting")])
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), detail_url.as_str());

    let response = server.get(&detail_url).await;
    let html = response.text();
    assert!(html.contains("Great reporting"));
    assert!(html.contains("author"));
}

#[tokio::test]
async fn test_empty_comment_rerenders_with_error() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "author", "secret").await;
    let response = server
        .post("/articles/new/")
        .form(&[("title", "Quiet piece"), ("body", "Details")])
        .await;
    let location = response.header("location");
    let detail_url = location.to_str().expect("location").to_string();

    let response = server.post(&detail_url).form(&[("body", "  ")]).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Comment must not be empty"));
}

#[tokio::test]
async fn test_non_author_gets_403_on_article_edit_and_delete() {
    let (server, _state) = common::spawn().await;

    common::signup_and_login(&server, "owner", "secret").await;
    let response = server
        .post("/articles/new/")
        .form(&[("title", "Mine"), ("body", "Details")])
        .await;
    let location = response.header("location");
    let detail_url = location.to_str().expect("location").to_string();

    // Log in as somebody else; cookies are replaced by the new session
    common::signup_and_login(&server, "intruder", "secret").await;

    let response = server.get(&format!("{}edit/", detail_url)).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .post(&format!("{}edit/", detail_url))
        .form(&[("title", "Hijacked"), ("body", "Details")])
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server.post(&format!("{}delete/", detail_url)).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // Untouched
    let response = server.get(&detail_url).await;
    assert!(response.text().contains("Mine"));
}

#[tokio::test]
async fn test_group_pages_show_membership_details() {
    let (server, state) = common::spawn().await;

    let token = common::api_session(&state, "fred", "secret").await;
    let fred = state
        .user_service
        .validate_session(&token)
        .await
        .expect("user");

    let group = state
        .band_service
        .create_group("Rust Programmers")
        .await
        .expect("group");
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
    state
        .band_service
        .add_member(group.id, fred.id, Some(date), Some("I like Rust."))
        .await
        .expect("membership");

    let response = server.get("/groups/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Rust Programmers"));

    let response = server.get(&format!("/groups/{}/", group.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("fred"));
    assert!(html.contains("2024-05-01"));
    assert!(html.contains("I like Rust."));

    let response = server.get("/groups/999/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
