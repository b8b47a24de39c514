//! Pillowcase Storage Library
//!
//! Filesystem-backed image storage. Every image lives in one flat directory as
//! `<identifier>.<ext>`; the directory listing is the only index.
//!
//! - [`identifier`] draws identifiers that collide with no stored file.
//! - [`local`] persists images and resolves an identifier back to a decoded
//!   image, tolerating files stored under a non-canonical extension.
//! - [`handle`] owns a decoded image for the duration of one request.

pub mod handle;
pub mod identifier;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use handle::{with_image, ImageHandle};
pub use identifier::generate_unique_id;
pub use local::LocalImageStorage;
pub use traits::{ImageStorage, StorageError, StorageResult};
