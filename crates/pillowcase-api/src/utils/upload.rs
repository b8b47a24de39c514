//! Multipart extraction for the upload handler

use axum::extract::Multipart;
use pillowcase_core::constants::{UPLOAD_FIELD_ALIAS, UPLOAD_FIELD_NAME};
use pillowcase_core::AppError;

/// File part of an upload request
#[derive(Debug, Default)]
pub struct UploadedFile {
    pub data: Option<Vec<u8>>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

/// Extract the uploaded file from a multipart form.
///
/// The first field named `image_file` (or `file`) is taken; any other field
/// is skipped. A form without such a field yields an `UploadedFile` with no
/// data, which the upload pipeline rejects as a missing file.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut upload = UploadedFile::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default();
        if upload.data.is_some() || !is_file_field(field_name) {
            continue;
        }

        upload.filename = field.file_name().map(|s| s.to_string());
        upload.content_type = field.content_type().map(|s| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(format!("Failed to read file data: {}", e)))?;

        upload.data = Some(data.to_vec());
    }

    Ok(upload)
}

fn is_file_field(name: &str) -> bool {
    name == UPLOAD_FIELD_NAME || name == UPLOAD_FIELD_ALIAS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_file_field() {
        assert!(is_file_field("image_file"));
        assert!(is_file_field("file"));
        assert!(!is_file_field("image"));
        assert!(!is_file_field(""));
    }
}
