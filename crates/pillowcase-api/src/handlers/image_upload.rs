use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use pillowcase_core::{AppError, ImageUploadResponse};
use pillowcase_processing::upload_image as run_upload;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;

/// Upload image handler
///
/// Accepts a multipart form with the image in the `image_file` field (`file`
/// also accepted), stores it as PNG under a fresh identifier and returns that
/// identifier.
///
/// # Errors
/// - `AppError::InvalidUpload` - no file in the request
/// - `AppError::UnsupportedMediaType` - part content type is not `image/*`
/// - `AppError::UnsupportedFileType` - bytes are not a decodable image
/// - `AppError::ImageTooLarge` - pixel count above the configured maximum
#[utoipa::path(
    post,
    path = "/image/",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = ImageUploadResponse),
        (status = 400, description = "Missing file, unsupported file type or image too large", body = ErrorResponse),
        (status = 415, description = "Content type is not an image", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageUploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Request is not a multipart form");
        AppError::InvalidUpload("Missing file".to_string())
    })?;

    let upload = extract_multipart_file(multipart).await?;

    tracing::debug!(
        filename = ?upload.filename,
        content_type = ?upload.content_type,
        size_bytes = upload.data.as_ref().map(|d| d.len()),
        "Received upload"
    );

    let storage = state.storage.clone();
    let limits = state.upload_limits;

    let image_id = tokio::task::spawn_blocking(move || {
        run_upload(
            storage.as_ref(),
            upload.data.as_deref(),
            upload.content_type.as_deref(),
            &limits,
        )
    })
    .await??;

    Ok(Json(ImageUploadResponse { image_id }))
}
