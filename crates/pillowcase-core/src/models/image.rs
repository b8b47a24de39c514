use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::ROTATION_STEP_DEGREES;

/// Opaque identifier of a stored image.
///
/// Rendered as the canonical lowercase hyphenated UUID string, which is also
/// the stem of the file the image is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct ImageId(Uuid);

impl ImageId {
    /// Draw a fresh random identifier. Uniqueness against storage is checked
    /// by the caller.
    pub fn new_random() -> Self {
        ImageId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ImageId {
    fn from(id: Uuid) -> Self {
        ImageId(id)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for ImageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ImageId)
    }
}

/// Rotation direction as accepted on the query string (`R`/`L`, any case).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RotationDirection {
    #[default]
    #[serde(rename = "R", alias = "r")]
    Clockwise,
    #[serde(rename = "L", alias = "l")]
    CounterClockwise,
}

/// Query parameters of `GET /image/{id}/rotated`
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RotateQuery {
    /// `R` for clockwise (default), `L` for counter-clockwise
    #[serde(default)]
    pub direction: RotationDirection,
    /// Non-negative multiple of 90
    pub degrees: i32,
}

impl Validate for RotateQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.degrees < 0 || self.degrees % ROTATION_STEP_DEGREES != 0 {
            let mut error = ValidationError::new("degrees");
            error.message = Some(Cow::from(
                "degrees must be a non-negative multiple of 90",
            ));
            errors.add("degrees", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Query parameters of `GET /image/{id}/resized`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResizeQuery {
    /// Fit inside the box preserving aspect ratio (default) or stretch to it
    #[serde(default = "default_lock_aspect_ratio", deserialize_with = "deserialize_flag")]
    pub lock_aspect_ratio: bool,
    #[validate(range(min = 1, message = "width must be greater than 0"))]
    pub width: u32,
    #[validate(range(min = 1, message = "height must be greater than 0"))]
    pub height: u32,
}

impl ResizeQuery {
    /// Pixel count of the requested box
    pub fn target_pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether producing this rendition would exceed `max_pixels`.
    ///
    /// A locked resize never enlarges, so only an unlocked one is bounded.
    pub fn exceeds_pixel_limit(&self, max_pixels: u64) -> bool {
        !self.lock_aspect_ratio && self.target_pixels() > max_pixels
    }
}

fn default_lock_aspect_ratio() -> bool {
    true
}

/// Accepts the usual spellings of a boolean flag (`true`, `1`, `yes`, `on`, ...).
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean value: {}",
            other
        ))),
    }
}

/// Response body of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageUploadResponse {
    pub image_id: ImageId,
}
