//! Centered square crop box computation and pixel-exact region extraction.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - `right` and `bottom` are exclusive
//! - All coordinates are in whole pixels
//!
//! # Rounding
//!
//! When the difference between the long and short side is odd, the centering
//! offset `(long - short) / 2` is not whole. The offset is rounded down, so
//! the box sits one pixel closer to the top-left edge than to the
//! bottom-right edge.

use crate::decode::DecodedImage;

use super::TransformError;

/// An axis-aligned pixel region `(left, top, right, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    /// Create a crop box from edge coordinates.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Compute the largest square centered on the longer dimension.
    ///
    /// Returns `None` for a degenerate raster (zero width or height).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use squarecrop_core::transform::CropBox;
    ///
    /// let b = CropBox::centered_square(4000, 3000).unwrap();
    /// assert_eq!(b, CropBox::new(500, 0, 3500, 3000));
    /// ```
    pub fn centered_square(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let crop_box = if width > height {
            let left = (width - height) / 2;
            Self::new(left, 0, left + height, height)
        } else {
            let top = (height - width) / 2;
            Self::new(0, top, width, top + width)
        };
        Some(crop_box)
    }

    /// Width of the region in pixels.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height of the region in pixels.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Side length if the box is square.
    pub fn side(&self) -> Option<u32> {
        (self.width() == self.height()).then_some(self.width())
    }

    /// Check whether this box covers the whole `width x height` raster.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.left == 0 && self.top == 0 && self.right >= width && self.bottom >= height
    }
}

/// Extract the pixels inside `crop_box`.
///
/// The box is clamped to the image bounds first, so a box reaching past the
/// right or bottom edge yields only the overlapping pixels. A box covering
/// the whole image returns a copy of it.
///
/// # Errors
///
/// Returns `TransformError::InvalidPixelData` if the pixel buffer does not
/// hold exactly `width * height * 3` bytes.
pub fn apply_crop(
    image: &DecodedImage,
    crop_box: CropBox,
) -> Result<DecodedImage, TransformError> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(TransformError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    if crop_box.covers(image.width, image.height) {
        return Ok(image.clone());
    }

    let left = crop_box.left.min(image.width);
    let top = crop_box.top.min(image.height);
    let right = crop_box.right.clamp(left, image.width);
    let bottom = crop_box.bottom.clamp(top, image.height);

    let out_width = (right - left) as usize;
    let out_height = (bottom - top) as usize;
    let src_stride = image.width as usize * 3;
    let row_len = out_width * 3;

    let mut output = Vec::with_capacity(row_len * out_height);
    for y in top as usize..bottom as usize {
        let start = y * src_stride + left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(DecodedImage {
        width: out_width as u32,
        height: out_height as u32,
        pixels: output,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
