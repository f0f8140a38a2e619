//! Image resampling.
//!
//! Wraps the `image` crate's separable filters. All functions return new
//! `DecodedImage` instances without modifying the input.

use crate::decode::{DecodedImage, FilterType};

use super::TransformError;

/// Resize an image to exact dimensions.
///
/// If the image already has the requested dimensions it is returned as an
/// unmodified copy, so resizing is idempotent.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` if `width` or `height` is zero
/// or the source is empty, and `TransformError::InvalidPixelData` if the
/// pixel buffer does not match the dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    if image.is_empty() {
        return Err(TransformError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or(TransformError::InvalidPixelData {
            expected: image.width as usize * image.height as usize * 3,
            actual: image.pixels.len(),
        })?;

    log::debug!(
        "resampling {}x{} -> {}x{} with {:?}",
        image.width,
        image.height,
        width,
        height,
        filter
    );
    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image to a `size x size` square.
///
/// Non-square inputs are stretched; crop first to keep the aspect ratio.
pub fn resize_square(
    image: &DecodedImage,
    size: u32,
    filter: FilterType,
) -> Result<DecodedImage, TransformError> {
    resize(image, size, size, filter)
}
