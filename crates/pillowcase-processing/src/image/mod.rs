//! Image processing module
//!
//! - decoder: content-sniffing decode of uploaded bytes with a pixel budget
//! - orientation: quarter-turn rotation
//! - resize: exact and aspect-preserving (thumbnail) resize
//! - encoder: PNG serialization

pub mod decoder;
pub mod encoder;
pub mod orientation;
pub mod resize;

pub use decoder::decode_upload;
pub use encoder::encode_png;
pub use orientation::{rotate, ImageOrientation};
pub use resize::{resize, ImageResizer};
