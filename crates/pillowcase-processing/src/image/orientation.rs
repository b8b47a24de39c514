use image::DynamicImage;
use pillowcase_core::RotationDirection;

/// Quarter-turn rotation
pub struct ImageOrientation;

impl ImageOrientation {
    /// Express a rotation request as a counter-clockwise angle in `(0, 360]`
    /// or `0`.
    ///
    /// The angle is first reduced modulo 360 (negative values included). A
    /// clockwise request for `d` becomes counter-clockwise `360 - d`, so a
    /// clockwise 0 comes out as 360, which is also a no-op.
    pub fn counter_clockwise_degrees(direction: RotationDirection, degrees: i32) -> i32 {
        let degrees = degrees.rem_euclid(360);
        match direction {
            RotationDirection::CounterClockwise => degrees,
            RotationDirection::Clockwise => (360 - degrees).abs(),
        }
    }

    /// Rotate by a counter-clockwise angle. Colour type is preserved.
    pub fn rotate_counter_clockwise(img: &DynamicImage, degrees: i32) -> DynamicImage {
        // DynamicImage::rotate90 turns clockwise
        match degrees {
            90 => img.rotate270(),
            180 => img.rotate180(),
            270 => img.rotate90(),
            0 | 360 => img.clone(),
            other => {
                tracing::debug!(degrees = other, "Not a quarter turn, image left unrotated");
                img.clone()
            }
        }
    }
}

/// Rotate `img` by `degrees` in `direction`.
pub fn rotate(img: &DynamicImage, direction: RotationDirection, degrees: i32) -> DynamicImage {
    let ccw = ImageOrientation::counter_clockwise_degrees(direction, degrees);

    tracing::debug!(
        direction = ?direction,
        requested_degrees = degrees,
        counter_clockwise_degrees = ccw,
        width = img.width(),
        height = img.height(),
        "Rotating image"
    );

    ImageOrientation::rotate_counter_clockwise(img, ccw)
}
