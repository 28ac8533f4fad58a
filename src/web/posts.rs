//! Post pages
//!
//! Blog-style CRUD under `/blog/`. Reading is public; writing requires a
//! login. Invalid form input re-renders the form with an error message
//! and the submitted values intact.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::api::middleware::{authenticate, AppState};
use crate::models::{CreatePostInput, UpdatePostInput, User};
use crate::render::base_context;
use crate::services::PostServiceError;
use crate::web::{not_found, redirect, redirect_to_login, render, server_error};

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

fn error_page(err: PostServiceError) -> Response {
    match err {
        PostServiceError::NotFound(_) => not_found(),
        err => {
            tracing::error!(error = %err, "Post page failed");
            server_error()
        }
    }
}

/// `GET /blog/:id/`
pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let user = authenticate(&state, &headers).await;
    let post = match state.post_service.get(id).await {
        Ok(post) => post,
        Err(err) => return error_page(err),
    };

    let mut context = base_context(user.as_ref());
    context.insert("post", &post);
    render(&state, "posts/post_detail.html", &context)
}

/// `GET /blog/new/`
pub async fn new_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };
    render(&state, "posts/post_new.html", &base_context(Some(&user)))
}

/// `POST /blog/new/`
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };

    let input = CreatePostInput {
        title: form.title.clone(),
        body: form.body.clone(),
    };
    match state.post_service.create(input, user.id).await {
        Ok(post) => redirect(&format!("/blog/{}/", post.id)),
        Err(PostServiceError::ValidationError(msg)) => {
            let mut context = base_context(Some(&user));
            context.insert("error", &msg);
            context.insert("title", &form.title);
            context.insert("body", &form.body);
            render(&state, "posts/post_new.html", &context)
        }
        Err(err) => error_page(err),
    }
}

/// `GET /blog/:id/update/`
pub async fn edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };
    let post = match state.post_service.get(id).await {
        Ok(post) => post,
        Err(err) => return error_page(err),
    };

    let mut context = base_context(Some(&user));
    context.insert("post", &post);
    render(&state, "posts/post_edit.html", &context)
}

/// `POST /blog/:id/update/`
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };

    let input = UpdatePostInput {
        title: Some(form.title.clone()),
        body: Some(form.body.clone()),
    };
    match state.post_service.update(id, input).await {
        Ok(post) => redirect(&format!("/blog/{}/", post.id)),
        Err(PostServiceError::ValidationError(msg)) => {
            render_edit_with_error(&state, &user, id, &form, &msg)
        }
        Err(err) => error_page(err),
    }
}

fn render_edit_with_error(
    state: &AppState,
    user: &User,
    id: i64,
    form: &PostForm,
    error: &str,
) -> Response {
    let mut context = base_context(Some(user));
    context.insert("error", error);
    // Echo the submitted values, not the stored ones
    context.insert(
        "post",
        &serde_json::json!({ "id": id, "title": form.title, "body": form.body }),
    );
    render(state, "posts/post_edit.html", &context)
}

/// `GET /blog/:id/delete/`
pub async fn delete_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };
    let post = match state.post_service.get(id).await {
        Ok(post) => post,
        Err(err) => return error_page(err),
    };

    let mut context = base_context(Some(&user));
    context.insert("post", &post);
    render(&state, "posts/post_delete.html", &context)
}

/// `POST /blog/:id/delete/`
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if authenticate(&state, &headers).await.is_none() {
        return redirect_to_login();
    }

    match state.post_service.delete(id).await {
        Ok(()) => redirect("/"),
        Err(err) => error_page(err),
    }
}
