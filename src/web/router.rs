//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    connect, create_file, disconnect, file_content, index_files, me, publish_file, register,
    show_file, stats, status, unpublish_file, AppState,
};

/// Slack on top of the encoded payload for the JSON envelope.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Request body limit for a given decoded upload limit.
///
/// Base64 inflates data by a factor of 4/3.
pub fn body_limit(max_upload_size: u64) -> usize {
    let encoded = (max_upload_size.saturating_add(2) / 3).saturating_mul(4);
    usize::try_from(encoded)
        .unwrap_or(usize::MAX)
        .saturating_add(BODY_LIMIT_SLACK)
}

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let file_routes = Router::new()
        .route("/files", post(create_file).get(index_files))
        .route("/files/:id", get(show_file))
        .route("/files/:id/publish", put(publish_file))
        .route("/files/:id/unpublish", put(unpublish_file))
        .route("/files/:id/data", get(file_content));

    let user_routes = Router::new()
        .route("/users", post(register))
        .route("/users/me", get(me))
        .route("/connect", get(connect))
        .route("/disconnect", get(disconnect));

    let app_routes = Router::new()
        .route("/status", get(status))
        .route("/stats", get(stats));

    let limit = body_limit(app_state.max_upload_size);

    Router::new()
        .merge(file_routes)
        .merge(user_routes)
        .merge(app_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
