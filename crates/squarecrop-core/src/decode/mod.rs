//! Image decoding for the square crop pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG images from files or in-memory bytes
//! - Optionally applying EXIF orientation before cropping
//!
//! Everything is decoded to a packed RGB8 [`DecodedImage`].
//!
//! # Examples
//!
//! ```ignore
//! use squarecrop_core::decode::decode_file;
//!
//! let image = decode_file("media/textures/jade.jpg").unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{
    decode_bytes, decode_bytes_oriented, decode_file, decode_file_oriented, get_orientation,
};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
