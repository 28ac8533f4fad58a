//! API layer - JSON endpoints and router assembly
//!
//! The JSON API lives under `/api/v1` and mirrors the original viewset
//! routes: post CRUD plus a read-only user list/detail. `build_router`
//! assembles the whole application (HTML routes and API) with CORS and
//! request tracing.

pub mod middleware;
pub mod posts;
pub mod responses;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the JSON API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Write operations need a session token
    let protected_routes = Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/{id}", put(posts::update_post))
        .route("/posts/{id}", delete(posts::delete_post))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/{id}", get(posts::get_post))
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .merge(protected_routes)
}

/// Build the complete application router
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(origin = cors_origin, "Invalid CORS origin, CORS disabled");
            CorsLayer::new()
        }
    };

    Router::new()
        .nest("/api/v1", build_api_router(state.clone()))
        .merge(crate::web::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
