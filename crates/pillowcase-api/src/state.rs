//! Application state shared by every handler.

use std::sync::Arc;

use pillowcase_core::Config;
use pillowcase_processing::UploadLimits;
use pillowcase_storage::ImageStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ImageStorage>,
    pub upload_limits: UploadLimits,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn ImageStorage>) -> Self {
        let upload_limits = UploadLimits {
            max_image_pixels: config.max_image_pixels,
            max_file_size: config.max_upload_size_bytes(),
        };

        Self {
            config,
            storage,
            upload_limits,
        }
    }
}
