//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Crate-level errors convert into
//! `AppError` through the `From` impls below, and `HttpAppError` renders them
//! with the status and body described by `ErrorMetadata`.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pillowcase_core::{AppError, ErrorMetadata, LogLevel};
use pillowcase_processing::{ProcessingError, UploadError, ValidationError};
use pillowcase_storage::StorageError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static EXPOSE_ERROR_DETAILS: AtomicBool = AtomicBool::new(false);

/// Include `error_type` and `cause` in non-sensitive error bodies.
pub fn set_expose_error_details(enabled: bool) {
    EXPOSE_ERROR_DETAILS.store(enabled, Ordering::Relaxed);
}

fn expose_error_details() -> bool {
    EXPOSE_ERROR_DETAILS.load(Ordering::Relaxed)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub detail: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: both the trait and AppError live in other crates)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = if expose_error_details() && !app_error.is_sensitive() {
            ErrorResponse {
                detail: app_error.client_message(),
                code: app_error.error_code().to_string(),
                error_type: Some(app_error.error_type().to_string()),
                cause: Some(app_error.detailed_message()),
            }
        } else {
            ErrorResponse {
                detail: app_error.client_message(),
                code: app_error.error_code().to_string(),
                error_type: None,
                cause: None,
            }
        };

        (status, Json(body)).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::ImageNotFound(id) => AppError::ImageNotFound(id),
            StorageError::HandleReleased(id) => {
                AppError::Internal(format!("Image handle for {} already released", id))
            }
            StorageError::WriteFailed(msg) => AppError::Internal(msg),
            StorageError::Io(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        let app = match err {
            ProcessingError::UnsupportedFileType => AppError::UnsupportedFileType,
            ProcessingError::ImageTooLarge { max_pixels } => AppError::ImageTooLarge { max_pixels },
            ProcessingError::Decode(msg) => AppError::Internal(msg),
            ProcessingError::Encode(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::MissingFile => AppError::InvalidUpload("Missing file".to_string()),
            ValidationError::FileTooLarge { size, max } => AppError::InvalidUpload(format!(
                "File too large: {} bytes exceeds max {} bytes",
                size, max
            )),
            ValidationError::InvalidContentType { content_type } => {
                AppError::UnsupportedMediaType(content_type)
            }
        };
        HttpAppError(app)
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Validation(err) => err.into(),
            UploadError::Processing(err) => err.into(),
            UploadError::Storage(err) => err.into(),
        }
    }
}

impl From<tokio::task::JoinError> for HttpAppError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!(error = %err, "Blocking task failed");
        HttpAppError(AppError::Internal(format!("Blocking task failed: {}", err)))
    }
}
