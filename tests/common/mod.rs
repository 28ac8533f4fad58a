#![allow(dead_code)]

//! Shared setup for HTTP-level tests: an in-memory database behind a real
//! router, with cookie saving enabled so login flows work like a browser.

use std::sync::Arc;

use axum_test::TestServer;

use gazette::api::{self, AppState};
use gazette::db::repositories::{
    SqlxArticleRepository, SqlxCommentRepository, SqlxGroupRepository, SqlxPostRepository,
    SqlxSessionRepository, SqlxUserRepository,
};
use gazette::db::{create_test_pool, migrations};
use gazette::render::TemplateEngine;
use gazette::services::{ArticleService, BandService, LoginInput, PostService, UserService};

pub async fn spawn() -> (TestServer, AppState) {
    let pool = create_test_pool().await.expect("test pool");
    migrations::run_migrations(&pool).await.expect("migrations");

    let state = AppState {
        user_service: Arc::new(UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool.clone()),
        )),
        post_service: Arc::new(PostService::new(SqlxPostRepository::boxed(pool.clone()))),
        article_service: Arc::new(ArticleService::new(
            SqlxArticleRepository::boxed(pool.clone()),
            SqlxCommentRepository::boxed(pool.clone()),
        )),
        band_service: Arc::new(BandService::new(SqlxGroupRepository::boxed(pool))),
        engine: Arc::new(TemplateEngine::new().expect("templates")),
    };

    let app = api::build_router(state.clone(), "http://localhost:3000");
    let server = TestServer::builder()
        .save_cookies()
        .build(app)
        .expect("test server");
    (server, state)
}

/// Register a user through the signup form and log in through the login
/// form, leaving the session cookie on the server.
pub async fn signup_and_login(server: &TestServer, username: &str, password: &str) {
    let email = format!("{}@example.com", username);
    server
        .post("/accounts/signup/")
        .form(&[
            ("username", username),
            ("email", &email),
            ("password", password),
            ("age", ""),
        ])
        .await;
    server
        .post("/accounts/login/")
        .form(&[("username", username), ("password", password)])
        .await;
}

/// Register a user directly against the service layer and return a
/// session token usable as a Bearer token.
pub async fn api_session(state: &AppState, username: &str, password: &str) -> String {
    let email = format!("{}@example.com", username);
    state
        .user_service
        .register(gazette::models::RegisterInput::new(username, email, password))
        .await
        .expect("register");
    state
        .user_service
        .login(LoginInput::new(username, password))
        .await
        .expect("login")
        .id
}
