use image::imageops::FilterType;
use image::DynamicImage;

/// Resampling filter for every resize (bicubic)
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

pub struct ImageResizer;

impl ImageResizer {
    /// Largest size no bigger than `box_width x box_height` that keeps the
    /// aspect ratio of `width x height`, or `None` when the image already fits.
    ///
    /// One side matches the box exactly. The other is the floor or ceiling of
    /// its exact value, whichever gives the ratio closer to the original,
    /// preferring the floor on a tie and never going below 1.
    pub fn thumbnail_dimensions(
        width: u32,
        height: u32,
        box_width: u32,
        box_height: u32,
    ) -> Option<(u32, u32)> {
        if box_width >= width && box_height >= height {
            return None;
        }

        let aspect = width as f64 / height as f64;
        let bw = box_width as f64;
        let bh = box_height as f64;

        if bw / bh >= aspect {
            let x = round_aspect(bh * aspect, |n| (aspect - n / bh).abs());
            Some((x, box_height))
        } else {
            let y = round_aspect(bw / aspect, |n| {
                if n == 0.0 {
                    0.0
                } else {
                    (aspect - bw / n).abs()
                }
            });
            Some((box_width, y))
        }
    }

    /// Stretch to exactly `width x height`
    pub fn resize_exact(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        if img.width() == width && img.height() == height {
            return img.clone();
        }
        img.resize_exact(width, height, RESIZE_FILTER)
    }

    /// Shrink to fit inside the box preserving the aspect ratio; never enlarges
    pub fn thumbnail(img: &DynamicImage, box_width: u32, box_height: u32) -> DynamicImage {
        match Self::thumbnail_dimensions(img.width(), img.height(), box_width, box_height) {
            Some((width, height)) => Self::resize_exact(img, width, height),
            None => img.clone(),
        }
    }
}

fn round_aspect<F>(number: f64, key: F) -> u32
where
    F: Fn(f64) -> f64,
{
    let floor = number.floor();
    let ceil = number.ceil();
    let chosen = if key(ceil) < key(floor) { ceil } else { floor };
    (chosen as u32).max(1)
}

/// Resize `img` to fit the requested box.
///
/// With `lock_aspect_ratio` the result fits inside the box with its ratio
/// preserved; otherwise it is exactly `width x height`.
pub fn resize(img: &DynamicImage, width: u32, height: u32, lock_aspect_ratio: bool) -> DynamicImage {
    let resized = if lock_aspect_ratio {
        ImageResizer::thumbnail(img, width, height)
    } else {
        ImageResizer::resize_exact(img, width, height)
    };

    tracing::debug!(
        original_width = img.width(),
        original_height = img.height(),
        requested_width = width,
        requested_height = height,
        lock_aspect_ratio = lock_aspect_ratio,
        width = resized.width(),
        height = resized.height(),
        "Resized image"
    );

    resized
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn test_locked_resize_fits_box() {
        let img = create_test_image(200, 100);
        let resized = resize(&img, 50, 50, true);
        assert_eq!(resized.dimensions(), (50, 25));
    }

    #[test]
    fn test_locked_resize_portrait() {
        let img = create_test_image(100, 300);
        let resized = resize(&img, 60, 60, true);
        assert_eq!(resized.dimensions(), (20, 60));
    }

    #[test]
    fn test_locked_resize_never_enlarges() {
        let img = create_test_image(40, 30);
        let resized = resize(&img, 400, 300, true);
        assert_eq!(resized.dimensions(), (40, 30));
    }

    #[test]
    fn test_locked_resize_when_one_side_already_fits() {
        let img = create_test_image(200, 100);
        let resized = resize(&img, 300, 50, true);
        assert_eq!(resized.dimensions(), (100, 50));
    }

    #[test]
    fn test_thumbnail_rounding() {
        // 800/3 = 266.66..; ceiling keeps the ratio closer
        assert_eq!(
            ImageResizer::thumbnail_dimensions(300, 900, 400, 800),
            Some((267, 800))
        );
        // 100 / (11/3) = 27.27..; floor keeps the ratio closer
        assert_eq!(
            ImageResizer::thumbnail_dimensions(1100, 300, 100, 100),
            Some((100, 27))
        );
        assert_eq!(
            ImageResizer::thumbnail_dimensions(900, 600, 1000, 400),
            Some((600, 400))
        );
        // 1000/1.5 = 666.66..; ceiling keeps the ratio closer
        assert_eq!(
            ImageResizer::thumbnail_dimensions(3000, 2000, 1000, 10000),
            Some((1000, 667))
        );
    }

    #[test]
    fn test_thumbnail_box_already_containing_image() {
        assert_eq!(ImageResizer::thumbnail_dimensions(300, 900, 400, 1000), None);
    }

    #[test]
    fn test_thumbnail_minimum_one_pixel() {
        assert_eq!(
            ImageResizer::thumbnail_dimensions(10000, 1, 10, 10),
            Some((10, 1))
        );
    }

    #[test]
    fn test_unlocked_resize_is_exact() {
        let img = create_test_image(200, 100);
        let resized = resize(&img, 30, 70, false);
        assert_eq!(resized.dimensions(), (30, 70));
    }

    #[test]
    fn test_unlocked_resize_can_enlarge() {
        let img = create_test_image(10, 10);
        let resized = resize(&img, 25, 15, false);
        assert_eq!(resized.dimensions(), (25, 15));
    }

    #[test]
    fn test_resize_preserves_colour_type() {
        let img = create_test_image(20, 10);
        assert_eq!(resize(&img, 5, 5, false).color(), img.color());
    }

    proptest! {
        #[test]
        fn prop_locked_resize_fits_and_keeps_ratio(
            width in 1u32..2000,
            height in 1u32..2000,
            box_width in 1u32..2000,
            box_height in 1u32..2000,
        ) {
            match ImageResizer::thumbnail_dimensions(width, height, box_width, box_height) {
                None => prop_assert!(box_width >= width && box_height >= height),
                Some((w, h)) => {
                    prop_assert!(w >= 1 && h >= 1);
                    prop_assert!(w <= box_width && h <= box_height);
                    prop_assert!(w == box_width || h == box_height);
                    // the free side is within one pixel of the exact ratio
                    let aspect = width as f64 / height as f64;
                    if box_width as f64 / box_height as f64 >= aspect {
                        prop_assert_eq!(h, box_height);
                        prop_assert!((w as f64 - h as f64 * aspect).abs() <= 1.0 || w == 1);
                    } else {
                        prop_assert_eq!(w, box_width);
                        prop_assert!((h as f64 - w as f64 / aspect).abs() <= 1.0 || h == 1);
                    }
                }
            }
        }
    }
}
