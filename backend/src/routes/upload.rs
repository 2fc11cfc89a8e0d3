//! Photo upload route
//!
//! Accepts a multipart form with a `photo` field and hands the bytes to
//! the photo store. The route raises Axum's default body limit so the
//! store's own 5 MiB payload check produces the specific error instead of
//! a framework rejection.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::MAX_PHOTO_BYTES;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use climbtrack_shared::types::UploadResponse;

/// Body limit for the upload route: comfortably above the 5 MiB photo cap
/// plus multipart framing, so oversize photos reach the size check
const UPLOAD_BODY_LIMIT: usize = 2 * MAX_PHOTO_BYTES;

/// Create upload routes
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_photo))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// POST /api/upload - store a photo, returning its reference
///
/// The returned `photoPath` is wired into a later session create/update
/// by the client; nothing links the two here.
async fn upload_photo(
    State(state): State<AppState>,
    _auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("photo") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("photo").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read uploaded file: {}", e)))?;

        let stored = state.photos().store(&data, &original_name, &mime_type).await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                message: "Photo uploaded successfully".to_string(),
                photo_path: stored.photo_path,
                filename: stored.filename,
                size: stored.size,
                mime_type: stored.mime_type,
            }),
        ));
    }

    Err(ApiError::Validation(
        "No file provided. The 'photo' field is required".to_string(),
    ))
}
