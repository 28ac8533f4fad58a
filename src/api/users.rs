//! User API endpoints
//!
//! Read-only user list/detail with the narrow `id`/`username` payload.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::UserResponse;

/// `GET /api/v1/users`
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_service.list_users().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list users");
        ApiError::internal_error("Internal server error")
    })?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(users))
}

/// `GET /api/v1/users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_service
        .get_user(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch user");
            ApiError::internal_error("Internal server error")
        })?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;
    Ok(Json(UserResponse::from(user)))
}
