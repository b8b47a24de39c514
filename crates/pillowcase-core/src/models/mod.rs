//! Data models shared by the storage, processing and API crates.

mod image;

pub use image::*;
