use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Black image with a red pixel in the top-right corner
pub fn marked_image(width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, BLACK);
    image.put_pixel(width - 1, 0, RED);
    image
}

pub fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image.clone())
        .to_rgb8()
        .write_to(&mut bytes, format)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("Failed to encode test png");
    bytes.into_inner()
}

pub fn decode_png(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .expect("Response is not a PNG")
        .to_rgba8()
}

/// Multipart form with a single file part
pub fn image_form(field: &str, data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(data).file_name(file_name).mime_type(mime_type);
    MultipartForm::new().add_part(field.to_string(), part)
}

pub fn png_form(image: &RgbaImage) -> MultipartForm {
    image_form("image_file", png_bytes(image), "test.png", "image/png")
}
