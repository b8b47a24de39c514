use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};
use pillowcase_processing::encode_png;
use pillowcase_storage::with_image;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::png_response;
use crate::state::AppState;
use crate::validation::parse_image_id;

/// Return a stored image as PNG
#[utoipa::path(
    get,
    path = "/image/{image_id}",
    tag = "images",
    params(
        ("image_id" = String, Path, description = "Image identifier")
    ),
    responses(
        (status = 200, description = "Image as PNG", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_image"))]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Result<Response, HttpAppError> {
    let id = parse_image_id(&image_id)?;
    let storage = state.storage.clone();

    let bytes = tokio::task::spawn_blocking(move || {
        with_image(storage.as_ref(), &id, encode_png)
    })
    .await???;

    png_response(bytes)
}
