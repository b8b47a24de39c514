//! Decoded image handle
//!
//! A handle owns the decoded raster of one stored image. The raster is freed
//! exactly once: by an explicit [`ImageHandle::release`]/[`ImageHandle::close`]
//! or, failing that, when the handle is dropped.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pillowcase_core::ImageId;

use crate::traits::{ImageStorage, StorageError, StorageResult};

#[derive(Debug)]
pub struct ImageHandle {
    id: ImageId,
    source: PathBuf,
    image: Option<DynamicImage>,
}

impl ImageHandle {
    pub fn new(id: ImageId, source: PathBuf, image: DynamicImage) -> Self {
        Self {
            id,
            source,
            image: Some(image),
        }
    }

    pub fn id(&self) -> &ImageId {
        &self.id
    }

    /// File the image was decoded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn image(&self) -> StorageResult<&DynamicImage> {
        self.image
            .as_ref()
            .ok_or_else(|| StorageError::HandleReleased(self.id.to_string()))
    }

    pub fn is_released(&self) -> bool {
        self.image.is_none()
    }

    /// Free the decoded raster. Fails with `HandleReleased` on a second call.
    pub fn release(&mut self) -> StorageResult<()> {
        match self.image.take() {
            Some(image) => {
                drop(image);
                tracing::debug!(image_id = %self.id, "Released image handle");
                Ok(())
            }
            None => Err(StorageError::HandleReleased(self.id.to_string())),
        }
    }

    /// Release the handle, tolerating one that was already released.
    pub fn close(mut self) -> StorageResult<()> {
        match self.release() {
            Ok(()) => Ok(()),
            Err(StorageError::HandleReleased(id)) => {
                tracing::warn!(image_id = %id, "Image handle already released");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl Drop for ImageHandle {
    fn drop(&mut self) {
        if self.image.is_some() {
            let _ = self.release();
        }
    }
}

/// Resolve `id`, run `f` on the decoded image and release the handle.
///
/// The handle is released on every exit path, including a panic inside `f`.
pub fn with_image<S, F, R>(storage: &S, id: &ImageId, f: F) -> StorageResult<R>
where
    S: ImageStorage + ?Sized,
    F: FnOnce(&DynamicImage) -> R,
{
    let handle = storage.open(id)?;
    let result = f(handle.image()?);
    handle.close()?;
    Ok(result)
}
