use std::io::Cursor;

use image::{DynamicImage, ImageError, ImageReader};

use crate::error::ProcessingError;

/// Decode uploaded bytes by sniffing their content.
///
/// The pixel count is checked from the header before the raster is
/// allocated; `width * height` above `max_pixels` is rejected.
pub fn decode_upload(data: &[u8], max_pixels: u64) -> Result<DynamicImage, ProcessingError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    let format = reader.format().ok_or(ProcessingError::UnsupportedFileType)?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| classify(e, max_pixels))?;

    let pixels = u64::from(width) * u64::from(height);
    if pixels > max_pixels {
        tracing::warn!(
            width = width,
            height = height,
            max_pixels = max_pixels,
            "Rejected oversized image"
        );
        return Err(ProcessingError::ImageTooLarge { max_pixels });
    }

    let image = ImageReader::with_format(Cursor::new(data), format)
        .decode()
        .map_err(|e| classify(e, max_pixels))?;

    tracing::debug!(
        format = ?format,
        width = width,
        height = height,
        "Decoded uploaded image"
    );

    Ok(image)
}

fn classify(err: ImageError, max_pixels: u64) -> ProcessingError {
    match err {
        ImageError::Limits(_) => ProcessingError::ImageTooLarge { max_pixels },
        ImageError::Unsupported(_) | ImageError::Decoding(_) => {
            ProcessingError::UnsupportedFileType
        }
        // reading from memory only fails on truncated data
        ImageError::IoError(_) => ProcessingError::UnsupportedFileType,
        other => ProcessingError::Decode(other.to_string()),
    }
}
