//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale and RGB sources decode to opaque ARGB.
//! JPEG has no alpha channel, so alpha is dropped on write.

use crate::{IoError, IoResult};
use goldenpix_core::{PixelBuffer, color};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use std::io::{Read, Write};

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let pixels: Vec<u32> = match info.pixel_format {
        PixelFormat::L8 => data.iter().map(|&g| color::compose_rgb(g, g, g)).collect(),
        // 16-bit samples are big-endian; keep the high byte
        PixelFormat::L16 => data
            .chunks_exact(2)
            .map(|s| color::compose_rgb(s[0], s[0], s[0]))
            .collect(),
        PixelFormat::RGB24 => data
            .chunks_exact(3)
            .map(|s| color::compose_rgb(s[0], s[1], s[2]))
            .collect(),
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG images are not supported".to_string(),
            ));
        }
    };

    Ok(PixelBuffer::from_data(width, height, pixels)?)
}

/// Write a `PixelBuffer` as a baseline RGB JPEG.
///
/// # Arguments
/// * `pix`     - The image to encode
/// * `writer`  - Destination writer
/// * `quality` - Encoder quality, 1-100
pub fn write_jpeg<W: Write>(pix: &PixelBuffer, writer: W, quality: u8) -> IoResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be in 1..=100, got {}",
            quality
        )));
    }
    let width = u16::try_from(pix.width()).map_err(|_| {
        IoError::EncodeError(format!("image too wide for JPEG: {}", pix.width()))
    })?;
    let height = u16::try_from(pix.height()).map_err(|_| {
        IoError::EncodeError(format!("image too tall for JPEG: {}", pix.height()))
    })?;

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(&pix.to_rgb_bytes(), width, height, ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_JPEG_QUALITY;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_solid() {
        let pix = PixelBuffer::new_filled(16, 8, color::compose_rgb(200, 30, 90)).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer, DEFAULT_JPEG_QUALITY).unwrap();

        let pix2 = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.dimensions(), (16, 8));
        // Lossy: allow a small per-channel error on a flat field
        let (r, g, b, a) = pix2.get_rgba(5, 5).unwrap();
        assert!((r as i32 - 200).abs() <= 4, "r = {}", r);
        assert!((g as i32 - 30).abs() <= 4, "g = {}", g);
        assert!((b as i32 - 90).abs() <= 4, "b = {}", b);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let pix = PixelBuffer::new_filled(8, 8, 0x0080_8080).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer, 90).unwrap();
        let pix2 = read_jpeg(Cursor::new(buffer)).unwrap();
        assert!(!pix2.has_transparency());
    }

    #[test]
    fn test_jpeg_invalid_quality() {
        let pix = PixelBuffer::new(2, 2).unwrap();
        assert!(write_jpeg(&pix, Vec::new(), 0).is_err());
        assert!(write_jpeg(&pix, Vec::new(), 101).is_err());
    }

    #[test]
    fn test_jpeg_garbage() {
        let data = [0xFF, 0xD8, 0xFF, 0x00, 0x01, 0x02, 0x03];
        assert!(read_jpeg(Cursor::new(&data[..])).is_err());
    }
}
