//! Group pages: the roster list and per-group member detail.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use crate::api::middleware::{authenticate, AppState};
use crate::render::base_context;
use crate::services::BandServiceError;
use crate::web::{not_found, render, server_error};

fn error_page(err: BandServiceError) -> Response {
    match err {
        BandServiceError::NotFound(_) => not_found(),
        err => {
            tracing::error!(error = %err, "Group page failed");
            server_error()
        }
    }
}

/// `GET /groups/`
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = authenticate(&state, &headers).await;
    let groups = match state.band_service.list_groups().await {
        Ok(groups) => groups,
        Err(err) => return error_page(err),
    };

    let mut context = base_context(user.as_ref());
    context.insert("groups", &groups);
    render(&state, "groups/group_list.html", &context)
}

/// `GET /groups/:id/`
pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let user = authenticate(&state, &headers).await;
    let group = match state.band_service.get_group(id).await {
        Ok(group) => group,
        Err(err) => return error_page(err),
    };
    let members = match state.band_service.members(id).await {
        Ok(members) => members,
        Err(err) => return error_page(err),
    };

    let mut context = base_context(user.as_ref());
    context.insert("group", &group);
    context.insert("members", &members);
    render(&state, "groups/group_detail.html", &context)
}
