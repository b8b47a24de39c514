//! Storage abstraction trait
//!
//! This module defines the `ImageStorage` trait implemented by storage backends.
//! All operations are blocking; async callers run them on the blocking pool.

use std::path::{Path, PathBuf};

use pillowcase_core::ImageId;
use thiserror::Error;

use crate::handle::ImageHandle;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Image with id {0} not found")]
    ImageNotFound(String),

    #[error("Image handle for {0} already released")]
    HandleReleased(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Image storage abstraction
///
/// Identifiers are opaque; a backend decides how they map to stored bytes.
pub trait ImageStorage: Send + Sync {
    /// Directory (or root) the backend stores images under
    fn directory(&self) -> &Path;

    /// Draw an identifier not used by any stored image. Creates nothing.
    fn generate_unique_id(&self) -> StorageResult<ImageId>;

    /// Persist encoded PNG bytes under `id` and return the written path
    fn persist(&self, id: &ImageId, png_bytes: &[u8]) -> StorageResult<PathBuf>;

    /// Resolve `id` to a decoded image owned by the returned handle
    fn open(&self, id: &ImageId) -> StorageResult<ImageHandle>;

    /// Check that the backend is usable
    fn health_check(&self) -> StorageResult<()>;
}
