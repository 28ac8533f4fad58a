//! HTML layer
//!
//! Server-rendered pages: the post board, articles with comments, group
//! rosters, and account forms. Form POSTs answer with a `302 Found`
//! redirect so browsers re-GET the target page.

pub mod accounts;
pub mod articles;
pub mod groups;
pub mod pages;
pub mod posts;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tera::Context;

use crate::api::middleware::AppState;

/// Build the HTML router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about/", get(pages::about))
        .route("/blog/new/", get(posts::new_form).post(posts::create))
        .route("/blog/{id}/", get(posts::detail))
        .route(
            "/blog/{id}/update/",
            get(posts::edit_form).post(posts::update),
        )
        .route(
            "/blog/{id}/delete/",
            get(posts::delete_form).post(posts::delete),
        )
        .route("/articles/", get(articles::list))
        .route(
            "/articles/new/",
            get(articles::new_form).post(articles::create),
        )
        .route(
            "/articles/{id}/",
            get(articles::detail).post(articles::add_comment),
        )
        .route(
            "/articles/{id}/edit/",
            get(articles::edit_form).post(articles::update),
        )
        .route(
            "/articles/{id}/delete/",
            get(articles::delete_form).post(articles::delete),
        )
        .route("/groups/", get(groups::list))
        .route("/groups/{id}/", get(groups::detail))
        .route(
            "/accounts/signup/",
            get(accounts::signup_form).post(accounts::signup),
        )
        .route(
            "/accounts/login/",
            get(accounts::login_form).post(accounts::login),
        )
        .route("/accounts/logout/", post(accounts::logout))
}

/// 302 redirect. Form handlers use this rather than `Redirect::to`, which
/// answers 303.
pub(crate) fn redirect(location: &str) -> Response {
    match header::HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(e) => {
            tracing::error!(error = %e, location, "Invalid redirect target");
            server_error()
        }
    }
}

pub(crate) fn redirect_to_login() -> Response {
    redirect("/accounts/login/")
}

/// Render a template into an HTML response
pub(crate) fn render(state: &AppState, template: &str, context: &Context) -> Response {
    match state.engine.render(template, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, template, "Template rendering failed");
            server_error()
        }
    }
}

pub(crate) fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<h1>Page not found</h1>".to_string()),
    )
        .into_response()
}

pub(crate) fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Html("<h1>Forbidden</h1>".to_string()),
    )
        .into_response()
}

pub(crate) fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<h1>Internal server error</h1>".to_string()),
    )
        .into_response()
}
