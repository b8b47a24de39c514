//! OpenAPI documentation served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::health;
use pillowcase_core::models;

/// Returns the OpenAPI spec for every public route.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pillowcase API",
        version = "0.1.0",
        description = "Upload raster images, fetch them back as PNG and request rotated or resized renditions on the fly."
    ),
    paths(
        handlers::image_upload::upload_image,
        handlers::image_get::get_image,
        handlers::transform::rotate_image,
        handlers::transform::resize_image,
        health::health_check,
    ),
    components(
        schemas(
            models::ImageId,
            models::ImageUploadResponse,
            models::RotationDirection,
            models::RotateQuery,
            models::ResizeQuery,
            health::HealthCheckResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "images", description = "Image upload, retrieval and transformation"),
        (name = "health", description = "Service health checks")
    )
)]
pub struct ApiDoc;
