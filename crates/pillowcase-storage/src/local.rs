use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{DynamicImage, ImageError, ImageReader};
use pillowcase_core::constants::CANONICAL_EXTENSION;
use pillowcase_core::ImageId;

use crate::handle::ImageHandle;
use crate::identifier;
use crate::traits::{ImageStorage, StorageError, StorageResult};

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalImageStorage {
    directory: PathBuf,
}

impl LocalImageStorage {
    /// Create a new LocalImageStorage, creating `directory` if it is missing
    pub fn new(directory: impl Into<PathBuf>) -> StorageResult<Self> {
        let directory = directory.into();

        fs::create_dir_all(&directory).map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                directory.display(),
                e
            ))
        })?;

        Ok(LocalImageStorage { directory })
    }

    /// Path an image with this identifier is written to
    pub fn canonical_path(&self, id: &ImageId) -> PathBuf {
        self.directory
            .join(format!("{}.{}", id, CANONICAL_EXTENSION))
    }

    /// Regular files whose name minus extension equals `id`, sorted by name,
    /// excluding the canonical path.
    fn fallback_candidates(&self, id: &ImageId) -> StorageResult<Vec<PathBuf>> {
        let stem = id.to_string();
        let canonical = self.canonical_path(id);
        let mut candidates = Vec::new();

        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path == canonical || !path.is_file() {
                continue;
            }
            if path.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str()) {
                candidates.push(path);
            }
        }

        candidates.sort();
        Ok(candidates)
    }
}

/// Decode a file by sniffing its content, ignoring the extension.
fn decode_file(path: &Path) -> Result<DynamicImage, ImageError> {
    let reader = ImageReader::open(path)
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?;
    reader.decode()
}

impl ImageStorage for LocalImageStorage {
    fn directory(&self) -> &Path {
        &self.directory
    }

    fn generate_unique_id(&self) -> StorageResult<ImageId> {
        identifier::generate_unique_id(&self.directory)
    }

    fn persist(&self, id: &ImageId, png_bytes: &[u8]) -> StorageResult<PathBuf> {
        let path = self.canonical_path(id);
        let size = png_bytes.len();
        let start = Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let written = file.write_all(png_bytes).and_then(|_| file.sync_all());
        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %cleanup,
                    "Failed to remove partially written image"
                );
            }
            return Err(StorageError::WriteFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            image_id = %id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(path)
    }

    fn open(&self, id: &ImageId) -> StorageResult<ImageHandle> {
        let start = Instant::now();
        let canonical = self.canonical_path(id);

        match decode_file(&canonical) {
            Ok(image) => {
                tracing::debug!(
                    path = %canonical.display(),
                    image_id = %id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Opened stored image"
                );
                return Ok(ImageHandle::new(*id, canonical, image));
            }
            Err(e) => {
                tracing::debug!(
                    path = %canonical.display(),
                    image_id = %id,
                    error = %e,
                    "Canonical image file not usable, scanning directory"
                );
            }
        }

        for candidate in self.fallback_candidates(id)? {
            match decode_file(&candidate) {
                Ok(image) => {
                    tracing::debug!(
                        path = %candidate.display(),
                        image_id = %id,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "Opened stored image under non-canonical name"
                    );
                    return Ok(ImageHandle::new(*id, candidate, image));
                }
                Err(e) => {
                    tracing::debug!(
                        path = %candidate.display(),
                        image_id = %id,
                        error = %e,
                        "Candidate file did not decode"
                    );
                }
            }
        }

        Err(StorageError::ImageNotFound(id.to_string()))
    }

    fn health_check(&self) -> StorageResult<()> {
        let metadata = fs::metadata(&self.directory)?;
        if !metadata.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "{} is not a directory",
                self.directory.display()
            )));
        }
        fs::read_dir(&self.directory)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::with_image;
    use image::{ImageFormat, Rgb, RgbImage};
    use tempfile::TempDir;

    fn sample_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 10, 30])))
    }

    fn png_bytes(image: &DynamicImage) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn setup() -> (TempDir, LocalImageStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalImageStorage::new(dir.path()).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = LocalImageStorage::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(storage.health_check().is_ok());
    }

    #[test]
    fn test_persist_then_open() {
        let (_dir, storage) = setup();
        let id = storage.generate_unique_id().unwrap();
        let path = storage
            .persist(&id, &png_bytes(&sample_image(4, 3)))
            .unwrap();

        assert_eq!(path, storage.canonical_path(&id));
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("{}.png", id)
        );

        let handle = storage.open(&id).unwrap();
        assert_eq!(handle.source(), path.as_path());
        let image = handle.image().unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
        assert_eq!(image.to_rgb8().get_pixel(0, 0), &Rgb([200, 10, 30]));
    }

    #[test]
    fn test_persist_refuses_to_overwrite() {
        let (_dir, storage) = setup();
        let id = ImageId::new_random();
        let bytes = png_bytes(&sample_image(1, 1));
        storage.persist(&id, &bytes).unwrap();
        assert!(matches!(
            storage.persist(&id, &bytes),
            Err(StorageError::WriteFailed(_))
        ));
    }

    #[test]
    fn test_open_falls_back_to_other_extension() {
        let (dir, storage) = setup();
        let id = ImageId::new_random();
        let path = dir.path().join(format!("{}.jpg", id));
        sample_image(5, 2)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let handle = storage.open(&id).unwrap();
        assert_eq!(handle.source(), path.as_path());
        assert_eq!(handle.image().unwrap().width(), 5);
    }

    #[test]
    fn test_open_skips_undecodable_canonical_file() {
        let (dir, storage) = setup();
        let id = ImageId::new_random();
        fs::write(storage.canonical_path(&id), b"not an image").unwrap();
        sample_image(2, 2)
            .save_with_format(dir.path().join(format!("{}.bmp", id)), ImageFormat::Png)
            .unwrap();

        let handle = storage.open(&id).unwrap();
        assert_eq!(handle.image().unwrap().height(), 2);
    }

    #[test]
    fn test_open_ignores_prefix_only_matches() {
        let (dir, storage) = setup();
        let id = ImageId::new_random();
        sample_image(2, 2)
            .save_with_format(dir.path().join(format!("{}-copy.png", id)), ImageFormat::Png)
            .unwrap();

        assert!(matches!(
            storage.open(&id),
            Err(StorageError::ImageNotFound(_))
        ));
    }

    #[test]
    fn test_open_missing_image() {
        let (dir, storage) = setup();
        let id = ImageId::new_random();
        fs::write(dir.path().join(format!("{}.txt", id)), b"plain text").unwrap();

        match storage.open(&id) {
            Err(StorageError::ImageNotFound(missing)) => assert_eq!(missing, id.to_string()),
            other => panic!("expected ImageNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_with_image_returns_closure_result() {
        let (_dir, storage) = setup();
        let id = ImageId::new_random();
        storage
            .persist(&id, &png_bytes(&sample_image(7, 9)))
            .unwrap();

        let dims = with_image(&storage, &id, |image| (image.width(), image.height())).unwrap();
        assert_eq!(dims, (7, 9));
    }

    #[test]
    fn test_with_image_missing_image() {
        let (_dir, storage) = setup();
        let result = with_image(&storage, &ImageId::new_random(), |image| image.width());
        assert!(matches!(result, Err(StorageError::ImageNotFound(_))));
    }
}
