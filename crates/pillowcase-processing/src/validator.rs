/// Validation errors for an upload request, raised before any decoding
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing file")]
    MissingFile,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type}")]
    InvalidContentType { content_type: String },
}

/// Upload validator
///
/// Checks the presence and size of the file and that the declared content
/// type is some `image/*` type. The actual format is sniffed at decode time.
pub struct UploadValidator {
    max_file_size: usize,
}

impl UploadValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate that a non-empty file within the size limit was sent
    pub fn validate_file<'a>(&self, data: Option<&'a [u8]>) -> Result<&'a [u8], ValidationError> {
        let data = match data {
            Some(data) if !data.is_empty() => data,
            _ => return Err(ValidationError::MissingFile),
        };

        if data.len() > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: data.len(),
                max: self.max_file_size,
            });
        }

        Ok(data)
    }

    /// Validate that the content type is `image/*`. Parameters and case are ignored.
    pub fn validate_content_type(&self, content_type: Option<&str>) -> Result<(), ValidationError> {
        let raw = content_type.unwrap_or("");
        let normalized = normalize_content_type(raw);

        if !normalized.starts_with("image/") {
            return Err(ValidationError::InvalidContentType {
                content_type: raw.to_string(),
            });
        }

        Ok(())
    }

    /// Presence first, then content type, then size.
    pub fn validate_all<'a>(
        &self,
        data: Option<&'a [u8]>,
        content_type: Option<&str>,
    ) -> Result<&'a [u8], ValidationError> {
        let data = match data {
            Some(data) if !data.is_empty() => data,
            _ => return Err(ValidationError::MissingFile),
        };
        self.validate_content_type(content_type)?;
        self.validate_file(Some(data))
    }
}

/// Lowercase the media type and drop any `; param=value` suffix
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}
