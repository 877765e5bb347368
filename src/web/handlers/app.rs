//! Service status handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::file::FileRepository;
use crate::web::dto::{StatsResponse, StatusResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /status - Liveness of the token store and database.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        redis: state.sessions.store().is_alive(),
        db: state.db.ping().await,
    })
}

/// GET /stats - Number of users and file records.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let users = UserRepository::new(state.db.pool()).count().await?;
    let files = FileRepository::new(state.db.pool()).count().await?;

    Ok(Json(StatsResponse { users, files }))
}
