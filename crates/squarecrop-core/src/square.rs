//! Centered square crop followed by a resample to a fixed side length.
//!
//! The pipeline is a single synchronous pass:
//! decode → compute crop box → crop → resize → (optionally) save.
//!
//! Each stage takes ownership of the previous stage's buffer or borrows it
//! only for the duration of the call, so the decoded source and the
//! intermediate square are dropped as soon as the next buffer exists.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::decode::{self, DecodeError, DecodedImage, FilterType};
use crate::encode::{self, EncodeError};
use crate::transform::{apply_crop, resize_square, CropBox, TransformError};

/// Errors surfaced by the square crop pipeline.
#[derive(Debug, Error)]
pub enum SquareError {
    /// The source could not be read or decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The target size or the decoded raster is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The result could not be written.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl From<TransformError> for SquareError {
    fn from(err: TransformError) -> Self {
        SquareError::InvalidArgument(err.to_string())
    }
}

/// Options for the square pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SquareOptions {
    /// Resampling filter; Lanczos3 unless overridden.
    pub filter: FilterType,
    /// Rotate/flip according to EXIF orientation before cropping.
    pub apply_orientation: bool,
}

/// Validate a signed, user-supplied side length.
///
/// # Errors
///
/// Returns `SquareError::InvalidArgument` if `value <= 0` or it does not fit in `u32`.
pub fn target_size(value: i64) -> Result<u32, SquareError> {
    if value <= 0 {
        return Err(SquareError::InvalidArgument(format!(
            "size must be positive, got {}",
            value
        )));
    }
    u32::try_from(value)
        .map_err(|_| SquareError::InvalidArgument(format!("size {} is too large", value)))
}

/// Load an image file and return its centered square resized to `size x size`.
///
/// Uses the default [`SquareOptions`]: Lanczos3 resampling, no EXIF orientation.
///
/// # Errors
///
/// - `SquareError::InvalidArgument` if `size` is zero or the image is degenerate
/// - `SquareError::Decode` if the file cannot be read or decoded
pub fn crop_and_resize(source: impl AsRef<Path>, size: u32) -> Result<DecodedImage, SquareError> {
    crop_and_resize_with(source, size, &SquareOptions::default())
}

/// Like [`crop_and_resize`], with explicit options.
pub fn crop_and_resize_with(
    source: impl AsRef<Path>,
    size: u32,
    options: &SquareOptions,
) -> Result<DecodedImage, SquareError> {
    check_size(size)?;

    let image = if options.apply_orientation {
        decode::decode_file_oriented(source)?
    } else {
        decode::decode_file(source)?
    };
    square_owned(image, size, options.filter)
}

/// Like [`crop_and_resize`], reading the encoded image from memory.
pub fn crop_and_resize_bytes(bytes: &[u8], size: u32) -> Result<DecodedImage, SquareError> {
    crop_and_resize_bytes_with(bytes, size, &SquareOptions::default())
}

/// Like [`crop_and_resize_bytes`], with explicit options.
pub fn crop_and_resize_bytes_with(
    bytes: &[u8],
    size: u32,
    options: &SquareOptions,
) -> Result<DecodedImage, SquareError> {
    check_size(size)?;

    let image = if options.apply_orientation {
        decode::decode_bytes_oriented(bytes)?
    } else {
        decode::decode_bytes(bytes)?
    };
    square_owned(image, size, options.filter)
}

/// Crop and resize an already decoded image.
pub fn crop_and_resize_image(
    image: &DecodedImage,
    size: u32,
    filter: FilterType,
) -> Result<DecodedImage, SquareError> {
    check_size(size)?;

    let crop_box = square_box(image)?;
    let square = apply_crop(image, crop_box)?;
    Ok(resize_square(&square, size, filter)?)
}

/// Run the pipeline and persist the result to `destination`.
///
/// The output format follows the destination extension. The destination is
/// only replaced once the whole image has been encoded.
pub fn crop_and_resize_to_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    size: u32,
    options: &SquareOptions,
) -> Result<DecodedImage, SquareError> {
    let destination = destination.as_ref();
    // Fail on an unsupported extension before doing any decoding work.
    encode::OutputFormat::from_path(destination)?;

    let output = crop_and_resize_with(source, size, options)?;
    encode::save_image(&output, destination)?;
    Ok(output)
}

fn check_size(size: u32) -> Result<(), SquareError> {
    if size == 0 {
        return Err(SquareError::InvalidArgument(
            "size must be positive, got 0".to_string(),
        ));
    }
    Ok(())
}

fn square_box(image: &DecodedImage) -> Result<CropBox, SquareError> {
    let crop_box = CropBox::centered_square(image.width, image.height).ok_or_else(|| {
        SquareError::InvalidArgument(format!(
            "degenerate image {}x{}",
            image.width, image.height
        ))
    })?;
    debug_assert_eq!(crop_box.side(), Some(image.width.min(image.height)));

    log::debug!(
        "square crop of {}x{}: ({}, {}, {}, {})",
        image.width,
        image.height,
        crop_box.left,
        crop_box.top,
        crop_box.right,
        crop_box.bottom
    );
    Ok(crop_box)
}

/// Owned variant that releases the source buffer right after cropping.
fn square_owned(
    image: DecodedImage,
    size: u32,
    filter: FilterType,
) -> Result<DecodedImage, SquareError> {
    let crop_box = square_box(&image)?;
    let square = if crop_box.covers(image.width, image.height) {
        image
    } else {
        let cropped = apply_crop(&image, crop_box)?;
        drop(image);
        cropped
    };
    Ok(resize_square(&square, size, filter)?)
}
