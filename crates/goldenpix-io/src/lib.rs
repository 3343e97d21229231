//! goldenpix-io - Image decoding and encoding
//!
//! Turns encoded image bytes into [`PixelBuffer`]s and back. The format is
//! sniffed from magic bytes, never from the file extension.
//!
//! | Format | Read | Write | Feature |
//! |---|---|---|---|
//! | PNG | all color types, 1-16 bit | 8-bit RGBA | `png-format` |
//! | JPEG | grayscale, RGB | RGB, any quality | `jpeg` |
//! | BMP | 1/4/8/24/32 bpp uncompressed | 24 bpp | `bmp` |

#[cfg(feature = "bmp")]
pub mod bmp;
mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
mod sample;

pub use error::{IoError, IoResult};
pub use format::detect_format_from_bytes;
pub use goldenpix_core::ImageFormat;
pub use sample::{calculate_sample_size, subsample};

use goldenpix_core::PixelBuffer;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JPEG quality used by [`write_image`] when the format is JPEG.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Read an image from a file path.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let data = fs::read(path.as_ref())?;
    log::debug!(
        "read {} bytes from {}",
        data.len(),
        path.as_ref().display()
    );
    read_image_mem(&data)
}

/// Decode an image held in memory.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] when the bytes are not a
/// recognized format (or the codec is disabled), and
/// [`IoError::DecodeError`] / [`IoError::InvalidData`] when they are
/// malformed.
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelBuffer> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(data),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Decode an image and subsample it so that it is not much larger than
/// `req_width x req_height`.
///
/// The sample factor is chosen by [`calculate_sample_size`].
pub fn read_image_sampled<P: AsRef<Path>>(
    path: P,
    req_width: u32,
    req_height: u32,
) -> IoResult<PixelBuffer> {
    let pix = read_image(path)?;
    let factor = calculate_sample_size(pix.width(), pix.height(), req_width, req_height);
    if factor == 1 {
        return Ok(pix);
    }
    Ok(subsample(&pix, factor)?)
}

/// Encode an image into a writer.
pub fn write_image_to<W: Write>(pix: &PixelBuffer, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer, DEFAULT_JPEG_QUALITY),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot write {:?}",
            other
        ))),
    }
}

/// Encode an image into a new byte vector.
pub fn write_image_mem(pix: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_image_to(pix, &mut out, format)?;
    Ok(out)
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(pix: &PixelBuffer, path: P, format: ImageFormat) -> IoResult<()> {
    let file = fs::File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    log::debug!(
        "wrote {}x{} {:?} to {}",
        pix.width(),
        pix.height(),
        format,
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldenpix_core::color;

    #[test]
    fn test_read_image_mem_rejects_garbage() {
        let err = read_image_mem(b"definitely not an image").unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn test_read_image_mem_empty() {
        assert!(read_image_mem(&[]).unwrap_err().is_decode_failure());
    }

    #[cfg(feature = "png-format")]
    #[test]
    fn test_mem_roundtrip_png() {
        let pix = PixelBuffer::new_filled(3, 2, 0x80ff_8000).unwrap();
        let bytes = write_image_mem(&pix, ImageFormat::Png).unwrap();
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Png);
        assert_eq!(read_image_mem(&bytes).unwrap(), pix);
    }

    #[cfg(feature = "bmp")]
    #[test]
    fn test_mem_roundtrip_bmp() {
        let pix = PixelBuffer::new_filled(7, 3, color::compose_rgb(1, 2, 3)).unwrap();
        let bytes = write_image_mem(&pix, ImageFormat::Bmp).unwrap();
        assert_eq!(read_image_mem(&bytes).unwrap(), pix);
    }

    #[test]
    fn test_write_unknown_format() {
        let pix = PixelBuffer::new(1, 1).unwrap();
        assert!(write_image_mem(&pix, ImageFormat::Unknown).is_err());
    }
}
