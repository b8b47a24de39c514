//! Shared constants

/// Extension every stored image is written with.
pub const CANONICAL_EXTENSION: &str = "png";

/// Content type of every image body the service returns.
pub const CANONICAL_CONTENT_TYPE: &str = "image/png";

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "image_file";

/// Alternate multipart field name accepted for the upload.
pub const UPLOAD_FIELD_ALIAS: &str = "file";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;

/// Decompression-bomb guard: `(1024 * 1024 * 1024) / 4 / 3` pixels.
pub const DEFAULT_MAX_IMAGE_PIXELS: u64 = 89_478_485;

pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Rotation is only defined for whole quarter turns.
pub const ROTATION_STEP_DEGREES: i32 = 90;
