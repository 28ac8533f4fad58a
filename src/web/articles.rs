//! Article pages
//!
//! Articles carry a comment thread and an ownership rule: only the author
//! may edit or delete, and anyone else gets a 403. Commenting just needs
//! a login.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::api::middleware::{authenticate, AppState};
use crate::models::{CreateArticleInput, CreateCommentInput, UpdateArticleInput, User};
use crate::render::base_context;
use crate::services::ArticleServiceError;
use crate::web::{forbidden, not_found, redirect, redirect_to_login, render, server_error};

#[derive(Debug, Deserialize)]
pub struct ArticleForm {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

fn error_page(err: ArticleServiceError) -> Response {
    match err {
        ArticleServiceError::NotFound(_) => not_found(),
        ArticleServiceError::PermissionDenied(_) => forbidden(),
        err => {
            tracing::error!(error = %err, "Article page failed");
            server_error()
        }
    }
}

/// `GET /articles/`
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = authenticate(&state, &headers).await;
    let articles = match state.article_service.list().await {
        Ok(articles) => articles,
        Err(err) => return error_page(err),
    };

    let mut context = base_context(user.as_ref());
    context.insert("articles", &articles);
    render(&state, "articles/article_list.html", &context)
}

async fn detail_page(
    state: &AppState,
    user: Option<&User>,
    id: i64,
    error: Option<&str>,
) -> Response {
    let article = match state.article_service.get(id).await {
        Ok(article) => article,
        Err(err) => return error_page(err),
    };
    let comments = match state.article_service.comments(id).await {
        Ok(comments) => comments,
        Err(err) => return error_page(err),
    };

    let mut context = base_context(user);
    context.insert("article", &article);
    context.insert("comments", &comments);
    if let Some(error) = error {
        context.insert("error", error);
    }
    render(state, "articles/article_detail.html", &context)
}

/// `GET /articles/:id/`
pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let user = authenticate(&state, &headers).await;
    detail_page(&state, user.as_ref(), id, None).await
}

/// `POST /articles/:id/` - add a comment
pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };

    let input = CreateCommentInput {
        article_id: id,
        body: form.body,
    };
    match state.article_service.add_comment(input, &user).await {
        Ok(_) => redirect(&format!("/articles/{}/", id)),
        Err(ArticleServiceError::ValidationError(msg)) => {
            detail_page(&state, Some(&user), id, Some(&msg)).await
        }
        Err(err) => error_page(err),
    }
}

/// `GET /articles/new/`
pub async fn new_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };
    render(
        &state,
        "articles/article_new.html",
        &base_context(Some(&user)),
    )
}

/// `POST /articles/new/`
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ArticleForm>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };

    let input = CreateArticleInput {
        title: form.title.clone(),
        body: form.body.clone(),
    };
    match state.article_service.create(input, &user).await {
        Ok(article) => redirect(&format!("/articles/{}/", article.id)),
        Err(ArticleServiceError::ValidationError(msg)) => {
            let mut context = base_context(Some(&user));
            context.insert("error", &msg);
            context.insert("title", &form.title);
            context.insert("body", &form.body);
            render(&state, "articles/article_new.html", &context)
        }
        Err(err) => error_page(err),
    }
}

/// `GET /articles/:id/edit/`
pub async fn edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };
    let article = match state.article_service.get(id).await {
        Ok(article) => article,
        Err(err) => return error_page(err),
    };
    if !user.owns(article.author_id) {
        return forbidden();
    }

    let mut context = base_context(Some(&user));
    context.insert("article", &article);
    render(&state, "articles/article_edit.html", &context)
}

/// `POST /articles/:id/edit/`
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<ArticleForm>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };

    let input = UpdateArticleInput {
        title: Some(form.title.clone()),
        body: Some(form.body.clone()),
    };
    match state.article_service.update(id, input, &user).await {
        Ok(article) => redirect(&format!("/articles/{}/", article.id)),
        Err(ArticleServiceError::ValidationError(msg)) => {
            let mut context = base_context(Some(&user));
            context.insert("error", &msg);
            // Echo the submitted values, not the stored ones
            context.insert(
                "article",
                &serde_json::json!({ "id": id, "title": form.title, "body": form.body }),
            );
            render(&state, "articles/article_edit.html", &context)
        }
        Err(err) => error_page(err),
    }
}

/// `GET /articles/:id/delete/`
pub async fn delete_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };
    let article = match state.article_service.get(id).await {
        Ok(article) => article,
        Err(err) => return error_page(err),
    };
    if !user.owns(article.author_id) {
        return forbidden();
    }

    let mut context = base_context(Some(&user));
    context.insert("article", &article);
    render(&state, "articles/article_delete.html", &context)
}

/// `POST /articles/:id/delete/`
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let Some(user) = authenticate(&state, &headers).await else {
        return redirect_to_login();
    };

    match state.article_service.delete(id, &user).await {
        Ok(()) => redirect("/articles/"),
        Err(err) => error_page(err),
    }
}
