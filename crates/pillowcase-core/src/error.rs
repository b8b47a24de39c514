//! Error types module
//!
//! All failures that can reach a client are unified under the closed
//! `AppError` enum. Crate-level errors (storage, processing, upload) convert
//! into it at the HTTP boundary; anything without a dedicated variant ends up
//! as `Internal`.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for client mistakes worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "IMAGE_NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients even in debug mode
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unsupported file type")]
    UnsupportedFileType,

    #[error("Maximum file size exceeded: {max_pixels} pixels")]
    ImageTooLarge { max_pixels: u64 },

    #[error("Image with id {0} not found")]
    ImageNotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidQuery(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::InvalidUpload(_) => (400, "INVALID_UPLOAD", false, LogLevel::Debug),
        AppError::UnsupportedMediaType(_) => (415, "UNSUPPORTED_MEDIA_TYPE", false, LogLevel::Debug),
        AppError::UnsupportedFileType => (400, "UNSUPPORTED_FILE_TYPE", false, LogLevel::Debug),
        AppError::ImageTooLarge { .. } => (400, "IMAGE_TOO_LARGE", false, LogLevel::Warn),
        AppError::ImageNotFound(_) => (404, "IMAGE_NOT_FOUND", false, LogLevel::Debug),
        AppError::InvalidQuery(_) => (422, "INVALID_QUERY", false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidUpload(_) => "InvalidUpload",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::UnsupportedFileType => "UnsupportedFileType",
            AppError::ImageTooLarge { .. } => "ImageTooLarge",
            AppError::ImageNotFound(_) => "ImageNotFound",
            AppError::InvalidQuery(_) => "InvalidQuery",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidUpload(ref msg) => msg.clone(),
            AppError::UnsupportedMediaType(_) => "Invalid content type".to_string(),
            AppError::UnsupportedFileType => "Unsupported file type".to_string(),
            AppError::ImageTooLarge { max_pixels } => {
                format!("Maximum file size exceeded: {} pixels", max_pixels)
            }
            AppError::ImageNotFound(ref id) => format!("Image with id {} not found", id),
            AppError::InvalidQuery(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
