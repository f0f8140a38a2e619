//! SquareCrop Core - centered square crop and resize
//!
//! This crate loads an image, crops it to the largest square centered on its
//! longer dimension, resamples that square to a target side length, and
//! optionally saves the result.
//!
//! # Module Structure
//!
//! - `decode` - JPEG/PNG decoding to RGB8, optional EXIF orientation
//! - `transform` - Crop box computation, cropping and resampling
//! - `encode` - PNG/JPEG encoding and atomic saving
//! - `square` - The end-to-end crop-and-resize pipeline

pub mod decode;
pub mod encode;
pub mod square;
pub mod transform;

pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::{save_image, EncodeError, OutputFormat};
pub use square::{
    crop_and_resize, crop_and_resize_bytes, crop_and_resize_bytes_with, crop_and_resize_image,
    crop_and_resize_to_file, crop_and_resize_with, target_size, SquareError, SquareOptions,
};
pub use transform::CropBox;
