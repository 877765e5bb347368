//! User handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::hash_password;
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{RegisterRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /users - Register a new user.
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(req) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let email = req
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing email"))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing password"))?;

    let repo = UserRepository::new(state.db.pool());
    if repo.get_by_email(&email).await?.is_some() {
        return Err(ApiError::bad_request("Already exist"));
    }

    let password_hash = hash_password(&password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal()
    })?;

    let user = repo.create(&NewUser::new(email, password_hash)).await?;
    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/me - The authenticated user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(auth.user_id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(user.into()))
}
