pub mod image_get;
pub mod image_upload;
pub mod transform;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use pillowcase_core::constants::CANONICAL_CONTENT_TYPE;
use pillowcase_core::AppError;

use crate::error::HttpAppError;

/// Build a `200 image/png` response around encoded bytes
pub(crate) fn png_response(bytes: Vec<u8>) -> Result<Response, HttpAppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, CANONICAL_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            AppError::Internal(e.to_string()).into()
        })
}
