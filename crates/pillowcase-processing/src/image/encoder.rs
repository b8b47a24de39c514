use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::error::ProcessingError;

/// Serialize `img` as PNG into an in-memory buffer.
///
/// 32-bit float rasters are converted to 16-bit RGBA first, every other
/// colour type is written as is.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ProcessingError> {
    let mut buffer = Cursor::new(Vec::new());

    let written = match img {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba16(img.to_rgba16()).write_to(&mut buffer, ImageFormat::Png)
        }
        _ => img.write_to(&mut buffer, ImageFormat::Png),
    };
    written.map_err(|e| ProcessingError::Encode(e.to_string()))?;

    let bytes = buffer.into_inner();
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        size_bytes = bytes.len(),
        "Encoded PNG"
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, GenericImageView, Rgb, Rgb32FImage, Rgba, RgbaImage};

    #[test]
    fn test_encoded_png_decodes_to_same_pixels() {
        let mut buffer = RgbaImage::from_pixel(6, 4, Rgba([1, 2, 3, 255]));
        buffer.put_pixel(5, 3, Rgba([250, 0, 0, 128]));
        let img = DynamicImage::ImageRgba8(buffer);

        let bytes = encode_png(&img).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (6, 4));
        assert_eq!(decoded.get_pixel(5, 3), Rgba([250, 0, 0, 128]));
    }

    #[test]
    fn test_float_images_are_converted() {
        let img = DynamicImage::ImageRgb32F(Rgb32FImage::from_pixel(2, 2, Rgb([0.5, 0.25, 1.0])));

        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();

        assert_eq!(decoded.color(), ColorType::Rgba16);
        assert_eq!(decoded.dimensions(), (2, 2));
    }
}
