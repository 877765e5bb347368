//! Session token authentication.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::error::FilesError;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// Extractor for authenticated users.
///
/// Reads the `X-Token` header and resolves it through the session store.
/// Absent, empty, unknown and expired tokens are all rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Resolved user id.
    pub user_id: i64,
    /// The session token presented.
    pub token: String,
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(FilesError::Unauthorized)?;

        let user_id = state.sessions.resolve(token).await.ok_or_else(|| {
            tracing::debug!("Session token rejected");
            FilesError::Unauthorized
        })?;

        Ok(AuthUser {
            user_id,
            token: token.to_string(),
        })
    }
}
