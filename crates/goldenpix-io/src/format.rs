//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.

use crate::{IoError, IoResult};
use goldenpix_core::ImageFormat;

/// Magic numbers for image format detection
mod magic {
    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// Formats we recognize but cannot decode
    pub const GIF87A: &[u8] = b"GIF87a";
    pub const GIF89A: &[u8] = b"GIF89a";
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
    pub const RIFF: &[u8] = b"RIFF";
    pub const WEBP: &[u8] = b"WEBP";
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    let known_unsupported = if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A)
    {
        Some("gif")
    } else if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        Some("tiff")
    } else if data.len() >= 12 && data.starts_with(magic::RIFF) && &data[8..12] == magic::WEBP {
        Some("webp")
    } else {
        None
    };

    match known_unsupported {
        Some(name) => Err(IoError::UnsupportedFormat(format!(
            "{} images are not supported",
            name
        ))),
        None => Err(IoError::UnsupportedFormat(
            "unknown image format".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_bmp() {
        let data = b"BM\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(detect_format_from_bytes(data).unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn test_detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let data = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_truncated_png_signature() {
        // Only the first half of the PNG signature
        let data = [0x89, 0x50, 0x4E, 0x47];
        assert!(detect_format_from_bytes(&data).is_err());
    }

    #[test]
    fn test_detect_known_unsupported() {
        let err = detect_format_from_bytes(b"GIF89a\x00\x00\x00\x00\x00\x00").unwrap_err();
        assert!(err.to_string().contains("gif"));
        let tiff = [0x49, 0x49, 0x2A, 0x00, 0x08, 0x00];
        assert!(detect_format_from_bytes(&tiff).is_err());
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"UNKNOWN_FORMAT").is_err());
        assert!(detect_format_from_bytes(b"x").is_err());
    }
}
