//! Pillowcase Processing Library
//!
//! Image decoding, geometric transforms, PNG encoding and the upload pipeline.
//! Everything here is synchronous and CPU-bound; the API crate runs it on the
//! blocking thread pool.

pub mod error;
pub mod image;
pub mod upload;
pub mod validator;

pub use error::ProcessingError;
pub use crate::image::{encode_png, resize, rotate, ImageOrientation, ImageResizer};
pub use upload::{upload_image, UploadError, UploadLimits};
pub use validator::{UploadValidator, ValidationError};
