//! Image encoding and saving.
//!
//! This module provides functionality for:
//! - Encoding images to PNG or JPEG
//! - Inferring the output format from a destination path
//! - Saving to disk without leaving partial files behind
//!
//! # Examples
//!
//! ```ignore
//! use squarecrop_core::encode::save_image;
//!
//! let image = squarecrop_core::crop_and_resize("media/textures/jade.jpg", 1024).unwrap();
//! save_image(&image, "media/textures/jade.png").unwrap();
//! ```

mod writer;

pub use writer::{
    encode_image, save_image, save_image_as, EncodeError, OutputFormat, DEFAULT_JPEG_QUALITY,
};
