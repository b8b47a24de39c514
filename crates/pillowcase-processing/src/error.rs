/// Errors raised while decoding, transforming or encoding an image
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Unsupported file type")]
    UnsupportedFileType,

    #[error("Maximum file size exceeded: {max_pixels} pixels")]
    ImageTooLarge { max_pixels: u64 },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}
