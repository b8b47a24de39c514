//! Rotated and resized renditions of a stored image.
//!
//! Transforms are computed per request and never persisted.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};
use pillowcase_core::{AppError, ResizeQuery, RotateQuery};
use pillowcase_processing::{encode_png, resize, rotate};
use pillowcase_storage::with_image;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::png_response;
use crate::state::AppState;
use crate::validation::{parse_image_id, ValidatedQuery};

/// Return a stored image rotated by a multiple of 90 degrees
#[utoipa::path(
    get,
    path = "/image/{image_id}/rotated",
    tag = "images",
    params(
        ("image_id" = String, Path, description = "Image identifier"),
        RotateQuery
    ),
    responses(
        (status = 200, description = "Rotated image as PNG", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(
        direction = ?query.direction,
        degrees = query.degrees,
        operation = "rotate_image"
    )
)]
pub async fn rotate_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<RotateQuery>,
) -> Result<Response, HttpAppError> {
    let id = parse_image_id(&image_id)?;
    let storage = state.storage.clone();

    let bytes = tokio::task::spawn_blocking(move || {
        with_image(storage.as_ref(), &id, |image| {
            encode_png(&rotate(image, query.direction, query.degrees))
        })
    })
    .await???;

    png_response(bytes)
}

/// Return a stored image resized to fit (or fill) the requested box
#[utoipa::path(
    get,
    path = "/image/{image_id}/resized",
    tag = "images",
    params(
        ("image_id" = String, Path, description = "Image identifier"),
        ResizeQuery
    ),
    responses(
        (status = 200, description = "Resized image as PNG", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 422, description = "Invalid query parameters or unlocked target above the pixel limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(
        width = query.width,
        height = query.height,
        lock_aspect_ratio = query.lock_aspect_ratio,
        operation = "resize_image"
    )
)]
pub async fn resize_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ResizeQuery>,
) -> Result<Response, HttpAppError> {
    let id = parse_image_id(&image_id)?;

    let max_pixels = state.config.max_image_pixels;
    if query.exceeds_pixel_limit(max_pixels) {
        return Err(AppError::InvalidQuery(format!(
            "Requested size {}x{} exceeds the maximum of {} pixels",
            query.width, query.height, max_pixels
        ))
        .into());
    }

    let storage = state.storage.clone();

    let bytes = tokio::task::spawn_blocking(move || {
        with_image(storage.as_ref(), &id, |image| {
            encode_png(&resize(image, query.width, query.height, query.lock_aspect_ratio))
        })
    })
    .await???;

    png_response(bytes)
}
