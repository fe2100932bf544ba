// THEORY:
// Labeling cost grows with the pixel count, and the heuristic gains nothing
// from fine detail: it only cares about the relative sizes of large blobs.
// The downsampler therefore bounds every image to `max_dimension` on its longer
// side before analysis, preserving aspect ratio.
//
// Resampling is nearest-neighbor on purpose. Interpolating filters would blend
// skin and non-skin pixels along blob edges into new colors that the classifier
// never saw in the source.

use image::imageops::{self, FilterType};
use image::{GenericImageView, ImageBuffer, Pixel as ImagePixel};
use std::num::NonZeroU32;

/// Default bound on the longer side of an analyzed image.
pub const DEFAULT_MAX_DIMENSION: NonZeroU32 = NonZeroU32::new(800).unwrap();

/// Target size for fitting `width x height` into a `max_dimension` square.
///
/// Returns `None` when the image already fits. Otherwise the width is clamped
/// first and the height scaled to match; if the height still exceeds the bound
/// it is clamped and the width rescaled. Neither side drops below 1.
pub fn thumbnail_dimensions(
    width: u32,
    height: u32,
    max_dimension: NonZeroU32,
) -> Option<(u32, u32)> {
    let max_dimension = max_dimension.get();
    if width <= max_dimension && height <= max_dimension {
        return None;
    }

    let (mut target_width, mut target_height) = (width, height);

    if target_width > max_dimension {
        target_height = (height as u64 * max_dimension as u64 / width as u64).max(1) as u32;
        target_width = max_dimension;
    }

    if target_height > max_dimension {
        target_width = (target_width as u64 * max_dimension as u64 / target_height as u64).max(1) as u32;
        target_height = max_dimension;
    }

    Some((target_width, target_height))
}

/// Returns a copy of `image` whose longer side is at most `max_dimension`.
pub fn downsample<I>(
    image: &I,
    max_dimension: NonZeroU32,
) -> ImageBuffer<I::Pixel, Vec<<I::Pixel as ImagePixel>::Subpixel>>
where
    I: GenericImageView,
    I::Pixel: 'static,
    <I::Pixel as ImagePixel>::Subpixel: 'static,
{
    let (width, height) = image.dimensions();
    match thumbnail_dimensions(width, height, max_dimension) {
        Some((target_width, target_height)) => {
            imageops::resize(image, target_width, target_height, FilterType::Nearest)
        }
        None => ImageBuffer::from_fn(width, height, |x, y| image.get_pixel(x, y)),
    }
}
