//! Static-ish pages: the home page post list and the about page.

use axum::{extract::State, http::HeaderMap, response::Response};

use crate::api::middleware::{authenticate, AppState};
use crate::render::base_context;
use crate::web::{render, server_error};

/// `GET /` - latest posts, newest first
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = authenticate(&state, &headers).await;

    let posts = match state.post_service.list().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load posts for home page");
            return server_error();
        }
    };

    let mut context = base_context(user.as_ref());
    context.insert("posts", &posts);
    render(&state, "home.html", &context)
}

/// `GET /about/`
pub async fn about(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = authenticate(&state, &headers).await;
    render(&state, "about.html", &base_context(user.as_ref()))
}
