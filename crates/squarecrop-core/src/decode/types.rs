//! Core types for image decoding.

use serde::Deserialize;
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The data is not in a recognized or enabled image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Resampling kernel used when scaling the square to its target side.
///
/// Deserialises from the lowercase variant name (`"lanczos3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Nearest,
    /// Triangle kernel.
    Bilinear,
    /// Antialiased on downscale; the pipeline default.
    #[default]
    Lanczos3,
}

impl FilterType {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation tag, read by the `decode_*_oriented` functions.
///
/// Each variant names the transform that brings the stored pixels upright.
/// Unknown or missing values map to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    /// Mirror across the top-left to bottom-right diagonal.
    Transpose,
    Rotate90CW,
    /// Mirror across the top-right to bottom-left diagonal.
    Transverse,
    Rotate270CW,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A packed RGB8 raster, row-major, 3 bytes per pixel.
///
/// Fields are public; operations that index into `pixels` check that its
/// length is `width * height * 3` before reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Copy into an `image::RgbImage`; `None` if the buffer length is wrong.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGB value at (x, y). Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// True for a zero-sized raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_filter_type_default_is_high_quality() {
        assert_eq!(FilterType::default(), FilterType::Lanczos3);
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(8), Orientation::Rotate270CW);
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_non_empty_image() {
        let img = DecodedImage::new(4, 3, vec![0u8; 4 * 3 * 3]);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_to_rgb_image_rejects_short_buffer() {
        let img = DecodedImage {
            width: 4,
            height: 3,
            pixels: vec![0; 5],
        };
        assert!(img.to_rgb_image().is_none());
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_pixel_lookup() {
        let img = DecodedImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.pixel(0, 0), [1, 2, 3]);
        assert_eq!(img.pixel(1, 0), [4, 5, 6]);
    }

    #[test]
    fn test_rgb_image_round_trip_keeps_buffer() {
        let img = DecodedImage::new(2, 2, (0u8..12).collect());
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(DecodedImage::from_rgb_image(rgb), img);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::Io("No such file or directory".to_string());
        assert_eq!(err.to_string(), "I/O error: No such file or directory");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
