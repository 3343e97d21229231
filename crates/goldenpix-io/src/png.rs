//! PNG image format support
//!
//! Every PNG flavor is normalized to 8-bit samples on decode (palettes and
//! low bit depths are expanded, 16-bit samples are stripped) and then packed
//! into ARGB. Writing always produces 8-bit RGBA so transparency survives.

use crate::{IoError, IoResult};
use goldenpix_core::{PixelBuffer, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize * samples];
        for px in row.chunks_exact(samples) {
            let pixel = match samples {
                1 => color::compose_rgb(px[0], px[0], px[0]),
                2 => color::compose_rgba(px[0], px[0], px[0], px[1]),
                3 => color::compose_rgb(px[0], px[1], px[2]),
                _ => color::compose_rgba(px[0], px[1], px[2], px[3]),
            };
            pixels.push(pixel);
        }
    }

    Ok(PixelBuffer::from_data(width, height, pixels)?)
}

/// Write a PNG image as 8-bit RGBA
pub fn write_png<W: Write>(pix: &PixelBuffer, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(&pix.to_rgba_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldenpix_core::PixelBufferMut;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut pm = PixelBufferMut::new(5, 5).unwrap();
        pm.set_rgb(0, 0, 255, 0, 0).unwrap();
        pm.set_rgb(1, 1, 0, 255, 0).unwrap();
        pm.set_rgba(2, 2, 0, 0, 255, 40).unwrap();
        let pix: PixelBuffer = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2, pix);
        assert_eq!(pix2.get_rgba(2, 2), Some((0, 0, 255, 40)));
    }

    #[test]
    fn test_png_read_grayscale() {
        // Encode an 8-bit grayscale PNG directly with the png crate
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 4, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 64, 128, 255]).unwrap();
        }

        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.dimensions(), (4, 1));
        assert_eq!(pix.get_rgba(1, 0), Some((64, 64, 64, 255)));
        assert_eq!(pix.get_pixel(3, 0), Some(color::WHITE));
    }

    #[test]
    fn test_png_read_rgb16_is_stripped() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 1, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0xAB, 0xCD, 0x12, 0x34, 0xFF, 0xFF]).unwrap();
        }

        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.get_rgba(0, 0), Some((0xAB, 0x12, 0xFF, 255)));
    }

    #[test]
    fn test_png_truncated() {
        let pix = PixelBuffer::new_filled(8, 8, color::BLACK).unwrap();
        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(read_png(Cursor::new(buffer)).is_err());
    }
}
