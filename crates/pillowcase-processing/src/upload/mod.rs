//! Upload pipeline: validate → decode → generate id → encode → persist.

mod pipeline;

pub use pipeline::{upload_image, UploadError, UploadLimits};
