//! Pillowcase Core Library
//!
//! Domain models, error types, configuration and constants shared across all
//! Pillowcase components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ImageId, ImageUploadResponse, ResizeQuery, RotateQuery, RotationDirection};
