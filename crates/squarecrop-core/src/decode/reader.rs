//! Image decoding from files and byte streams, with optional EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes without applying EXIF orientation.
///
/// The format is sniffed from the content, so any codec enabled in the
/// `image` dependency (JPEG, PNG) is accepted. Pixels are converted to RGB8.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized image.
/// Returns `DecodeError::CorruptedFile` if decoding fails partway.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Decode an image from bytes, applying EXIF orientation correction.
pub fn decode_bytes_oriented(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;

    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Read and decode an image file without applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read (missing, permissions),
/// otherwise the same errors as [`decode_bytes`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedImage, DecodeError> {
    let bytes = read_source(path.as_ref())?;
    decode_bytes(&bytes)
}

/// Read and decode an image file, applying EXIF orientation correction.
pub fn decode_file_oriented(path: impl AsRef<Path>) -> Result<DecodedImage, DecodeError> {
    let bytes = read_source(path.as_ref())?;
    decode_bytes_oriented(&bytes)
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn read_source(path: &Path) -> Result<Vec<u8>, DecodeError> {
    log::debug!("reading image source {}", path.display());
    std::fs::read(path).map_err(|e| DecodeError::Io(format!("{}: {}", path.display(), e)))
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        pixels
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&gradient(width, height), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 90)
            .write_image(&gradient(width, height), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let bytes = png_bytes(7, 5);
        let img = decode_bytes(&bytes).unwrap();

        assert_eq!((img.width, img.height), (7, 5));
        assert_eq!(img.pixels, gradient(7, 5));
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = jpeg_bytes(16, 9);
        let img = decode_bytes(&bytes).unwrap();

        assert_eq!(img.width, 16);
        assert_eq!(img.height, 9);
        assert_eq!(img.pixels.len(), 16 * 9 * 3);
    }

    #[test]
    fn test_decode_oriented_without_exif_matches_plain() {
        let bytes = jpeg_bytes(8, 4);
        let plain = decode_bytes(&bytes).unwrap();
        let oriented = decode_bytes_oriented(&bytes).unwrap();

        assert_eq!(plain, oriented);
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_bytes(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_bytes(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(32, 32);
        let result = decode_bytes(&bytes[..bytes.len() / 2]);

        match result {
            Err(DecodeError::CorruptedFile(_)) => {}
            other => panic!("Expected CorruptedFile error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode_file(dir.path().join("missing.jpg"));

        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        std::fs::write(&path, png_bytes(3, 2)).unwrap();

        let img = decode_file(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));

        let oriented = decode_file_oriented(&path).unwrap();
        assert_eq!(oriented, img);
    }

    #[test]
    fn test_orientation_no_exif() {
        assert_eq!(get_orientation(&jpeg_bytes(4, 4)), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    fn red_green_strip() -> DynamicImage {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        DynamicImage::ImageRgb8(rgb)
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let result = apply_orientation(red_green_strip(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let result = apply_orientation(red_green_strip(), Orientation::FlipHorizontal).into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_normal_is_identity() {
        let result = apply_orientation(red_green_strip(), Orientation::Normal).into_rgb8();
        assert_eq!(result.into_raw(), vec![255, 0, 0, 0, 255, 0]);
    }
}
