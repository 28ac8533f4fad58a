//! Post API endpoints
//!
//! JSON CRUD for posts. Reads are public; writes require a session token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::responses::PostResponse;
use crate::models::{CreatePostInput, UpdatePostInput};
use crate::services::PostServiceError;

fn map_error(err: PostServiceError) -> ApiError {
    match err {
        PostServiceError::NotFound(id) => ApiError::not_found(format!("Post {} not found", id)),
        PostServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        PostServiceError::InternalError(e) => {
            tracing::error!(error = %e, "Post operation failed");
            ApiError::internal_error("Internal server error")
        }
    }
}

/// `GET /api/v1/posts`
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.post_service.list().await.map_err(map_error)?;
    let posts: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(Json(posts))
}

/// `GET /api/v1/posts/:id`
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.post_service.get(id).await.map_err(map_error)?;
    Ok(Json(PostResponse::from(post)))
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
}

/// `POST /api/v1/posts`
pub async fn create_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreatePostInput {
        title: req.title,
        body: req.body,
    };
    let post = state
        .post_service
        .create(input, user.id)
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// `PUT /api/v1/posts/:id`
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(AuthenticatedUser(_user)): Extension<AuthenticatedUser>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdatePostInput {
        title: req.title,
        body: req.body,
    };
    let post = state
        .post_service
        .update(id, input)
        .await
        .map_err(map_error)?;
    Ok(Json(PostResponse::from(post)))
}

/// `DELETE /api/v1/posts/:id`
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(AuthenticatedUser(_user)): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    state.post_service.delete(id).await.map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}
