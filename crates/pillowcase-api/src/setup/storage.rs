//! Storage setup and initialization

use anyhow::{Context, Result};
use pillowcase_core::Config;
use pillowcase_storage::{ImageStorage, LocalImageStorage};
use std::sync::Arc;

/// Open the image directory, creating it when missing.
pub fn setup_storage(config: &Config) -> Result<Arc<dyn ImageStorage>> {
    tracing::info!(
        directory = %config.image_directory.display(),
        "Initializing image storage..."
    );

    let storage = LocalImageStorage::new(config.image_directory.clone()).with_context(|| {
        format!(
            "Failed to open image directory {}",
            config.image_directory.display()
        )
    })?;

    storage
        .health_check()
        .context("Image directory is not readable")?;

    tracing::info!("Image storage initialized successfully");

    Ok(Arc::new(storage))
}
