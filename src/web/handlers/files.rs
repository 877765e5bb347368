//! File handlers for Web API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{CreateFileBody, FileResponse, IndexQuery};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;
use crate::FilesError;

/// Parse a path id; anything that is not an integer names no record.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::not_found())
}

/// POST /files - Create a folder, file or image.
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    body: Result<Json<CreateFileBody>, JsonRejection>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::from(FilesError::TooLarge(state.max_upload_size))
        } else {
            ApiError::bad_request(rejection.body_text())
        }
    })?;

    let record = state
        .file_service()
        .create(auth.user_id, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /files/:id - Show one of the caller's records.
pub async fn show_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.file_service().show(auth.user_id, id).await?;
    Ok(Json(record.into()))
}

/// GET /files - List the caller's records under a parent, 20 per page.
pub async fn index_files(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<IndexQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let records = state
        .file_service()
        .index(auth.user_id, query.parent(), query.page())
        .await?;

    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}

/// PUT /files/:id/publish - Make a record public.
pub async fn publish_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.file_service().publish(auth.user_id, id).await?;
    Ok(Json(record.into()))
}

/// PUT /files/:id/unpublish - Make a record private.
pub async fn unpublish_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.file_service().unpublish(auth.user_id, id).await?;
    Ok(Json(record.into()))
}

/// GET /files/:id/data - Raw content of a file or image.
pub async fn file_content(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let content = state.file_service().content(auth.user_id, id).await?;

    Ok(([(header::CONTENT_TYPE, content.content_type)], content.bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::error::ErrorCode;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert_eq!(parse_id("abc").unwrap_err().code(), ErrorCode::NotFound);
        assert_eq!(parse_id("").unwrap_err().code(), ErrorCode::NotFound);
    }
}
