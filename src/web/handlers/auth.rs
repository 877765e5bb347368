//! Session handlers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::auth::{parse_basic_credentials, verify_password};
use crate::db::UserRepository;
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /connect - Sign in with Basic credentials and receive a session token.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let creds = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_credentials)
        .ok_or_else(ApiError::unauthorized)?;

    let user = UserRepository::new(state.db.pool())
        .get_by_email(&creds.email)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    verify_password(&creds.password, &user.password).map_err(|_| {
        tracing::debug!(user_id = user.id, "Password mismatch");
        ApiError::unauthorized()
    })?;

    let token = state.sessions.open(user.id).await;
    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - End the current session.
pub async fn disconnect(State(state): State<Arc<AppState>>, auth: AuthUser) -> StatusCode {
    state.sessions.close(&auth.token).await;
    StatusCode::NO_CONTENT
}
