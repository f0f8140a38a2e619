//! PNG and JPEG encoding, and atomic persistence to a destination path.
//!
//! Images are always encoded fully in memory before anything touches the
//! filesystem. The bytes are then written to a temporary file next to the
//! destination and renamed over it, so a failed save never leaves a partial
//! or corrupt output file.

use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::decode::DecodedImage;

/// JPEG quality used when the format is inferred from a path.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur during encoding or saving.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The destination extension does not map to an enabled encoder
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The codec rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing or renaming the destination failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// Infer the format from a path's extension (case-insensitive).
    ///
    /// `.png` maps to PNG; `.jpg` and `.jpeg` map to JPEG at
    /// [`DEFAULT_JPEG_QUALITY`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EncodeError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or_else(|| EncodeError::UnsupportedFormat(path.display().to_string()))?;

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            _ => Err(EncodeError::UnsupportedFormat(ext)),
        }
    }
}

/// Encode an image to bytes in the given format.
///
/// JPEG quality is clamped to 1-100.
pub fn encode_image(image: &DecodedImage, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * 3;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &image.pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Jpeg { quality } => {
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100)).write_image(
                &image.pixels,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Save an image, choosing the format from the destination extension.
pub fn save_image(image: &DecodedImage, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    save_image_as(image, path, format)
}

/// Save an image in an explicit format, replacing the destination atomically.
pub fn save_image_as(
    image: &DecodedImage,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let bytes = encode_image(image, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let io_err = |e: std::io::Error| EncodeError::Io(format!("{}: {}", path.display(), e));

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    log::debug!(
        "wrote {} bytes ({:?}) to {}",
        bytes.len(),
        format,
        path.display()
    );
    Ok(())
}
