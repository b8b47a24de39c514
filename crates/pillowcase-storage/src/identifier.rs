//! Collision-free identifier generation
//!
//! An identifier is taken when any entry of the storage directory has a file
//! name starting with its string form, whatever the extension.

use std::fs;
use std::path::Path;

use pillowcase_core::ImageId;

use crate::traits::StorageResult;

/// Draw random identifiers until one matches no file in `directory`.
pub fn generate_unique_id(directory: &Path) -> StorageResult<ImageId> {
    generate_unique_id_with(directory, ImageId::new_random)
}

/// Same as [`generate_unique_id`] with a caller-supplied source of candidates.
///
/// The directory is listed again after every draw. There is no retry bound.
pub fn generate_unique_id_with<F>(directory: &Path, mut draw: F) -> StorageResult<ImageId>
where
    F: FnMut() -> ImageId,
{
    let mut attempts: u32 = 0;

    loop {
        let candidate = draw();
        attempts += 1;

        if !is_taken(directory, &candidate)? {
            tracing::debug!(
                image_id = %candidate,
                attempts = attempts,
                "Generated image identifier"
            );
            return Ok(candidate);
        }

        tracing::warn!(
            image_id = %candidate,
            directory = %directory.display(),
            "Identifier already used by a stored file, drawing again"
        );
    }
}

fn is_taken(directory: &Path, candidate: &ImageId) -> StorageResult<bool> {
    let prefix = candidate.to_string();

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with(&prefix) {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn fixed_id(n: u128) -> ImageId {
        ImageId::from(Uuid::from_u128(n))
    }

    #[test]
    fn test_generates_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let mut seen = HashSet::new();

        for _ in 0..50 {
            let id = generate_unique_id(dir.path()).unwrap();
            assert!(seen.insert(id), "duplicate id {}", id);
            fs::write(dir.path().join(format!("{}.png", id)), b"x").unwrap();
        }
    }

    #[test]
    fn test_creates_no_file() {
        let dir = TempDir::new().unwrap();
        generate_unique_id(dir.path()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_skips_id_used_under_other_extension() {
        let dir = TempDir::new().unwrap();
        let taken = fixed_id(1);
        let free = fixed_id(2);
        fs::write(dir.path().join(format!("{}.jpg", taken)), b"x").unwrap();

        let mut candidates = vec![taken, free].into_iter();
        let id = generate_unique_id_with(dir.path(), || candidates.next().unwrap()).unwrap();

        assert_eq!(id, free);
    }

    #[test]
    fn test_prefix_match_counts_as_collision() {
        let dir = TempDir::new().unwrap();
        let taken = fixed_id(7);
        let free = fixed_id(8);
        fs::write(dir.path().join(format!("{}-backup", taken)), b"x").unwrap();

        let mut candidates = vec![taken, taken, free].into_iter();
        let id = generate_unique_id_with(dir.path(), || candidates.next().unwrap()).unwrap();

        assert_eq!(id, free);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(generate_unique_id(&missing).is_err());
    }
}
