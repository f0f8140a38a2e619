//! Image transformation operations: square cropping and resampling.
//!
//! # Transform Order
//!
//! The square pipeline applies transforms in this order:
//! 1. Centered square crop ([`CropBox::centered_square`] + [`apply_crop`])
//! 2. Resample to the target side ([`resize_square`])

mod crop;
mod resize;

use thiserror::Error;

pub use crop::{apply_crop, CropBox};
pub use resize::{resize, resize_square};

/// Errors that can occur while transforming pixel buffers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}
