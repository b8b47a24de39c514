use std::time::Instant;

use pillowcase_core::ImageId;
use pillowcase_storage::{ImageStorage, StorageError};

use crate::error::ProcessingError;
use crate::image::{decode_upload, encode_png};
use crate::validator::{UploadValidator, ValidationError};

/// Limits applied to every upload
#[derive(Clone, Copy, Debug)]
pub struct UploadLimits {
    pub max_image_pixels: u64,
    pub max_file_size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Store an uploaded image and return its new identifier.
///
/// The image is re-encoded as PNG whatever format it was sent in. Exactly one
/// file is written on success and none on any failure before the write.
pub fn upload_image<S>(
    storage: &S,
    data: Option<&[u8]>,
    content_type: Option<&str>,
    limits: &UploadLimits,
) -> Result<ImageId, UploadError>
where
    S: ImageStorage + ?Sized,
{
    let start = Instant::now();

    let validator = UploadValidator::new(limits.max_file_size);
    let data = validator.validate_all(data, content_type)?;

    let image = decode_upload(data, limits.max_image_pixels)?;
    let (width, height) = (image.width(), image.height());

    let image_id = storage.generate_unique_id()?;
    let png = encode_png(&image)?;
    drop(image);

    storage.persist(&image_id, &png)?;

    tracing::info!(
        image_id = %image_id,
        content_type = content_type.unwrap_or(""),
        original_size_bytes = data.len(),
        stored_size_bytes = png.len(),
        width = width,
        height = height,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Image uploaded"
    );

    Ok(image_id)
}
