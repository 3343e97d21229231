//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap files at 1, 4, 8, 24 and 32 bpp
//! (palettes are expanded to ARGB) and writes 24-bit bottom-up bitmaps.

use crate::{IoError, IoResult};
use goldenpix_core::{PixelBuffer, color};
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Largest info header we accept (BITMAPV5HEADER is 124 bytes)
const MAX_BMP_HEADER_SIZE: u32 = 1024;

/// Maximum decoded image size in pixels
const MAX_BMP_PIXELS: u64 = 1 << 28;

fn le_u16(buf: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([buf[off], buf[off + 1]])
}

fn le_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

fn skip<R: Read>(reader: &mut R, n: usize) -> IoResult<()> {
    let skipped = std::io::copy(&mut reader.by_ref().take(n as u64), &mut std::io::sink())
        .map_err(IoError::Io)?;
    if skipped < n as u64 {
        return Err(IoError::Io(std::io::Error::from(
            std::io::ErrorKind::UnexpectedEof,
        )));
    }
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<PixelBuffer> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header).map_err(IoError::Io)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header).map_err(IoError::Io)?;

    let header_size = le_u32(&info_header, 0);
    if !(BMP_INFO_HEADER_SIZE..=MAX_BMP_HEADER_SIZE).contains(&header_size) {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_u32(&info_header, 4) as i32;
    let height = le_u32(&info_header, 8) as i32;
    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }
    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    // BI_RGB and BI_BITFIELDS with the default masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }
    if width <= 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid BMP dimensions: {}x{}",
            width, height
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();
    let npixels = width as u64 * height as u64;
    if npixels > MAX_BMP_PIXELS {
        return Err(IoError::InvalidData(format!(
            "BMP too large: {width}x{height} exceeds {MAX_BMP_PIXELS} pixels"
        )));
    }

    skip(&mut reader, header_size as usize - BMP_INFO_HEADER_SIZE as usize)?;
    let mut consumed = BMP_FILE_HEADER_SIZE + header_size as usize;

    let palette: Vec<u32> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw).map_err(IoError::Io)?;
        consumed += raw.len();
        raw.chunks_exact(4)
            .map(|q| color::compose_rgb(q[2], q[1], q[0]))
            .collect()
    } else {
        Vec::new()
    };

    if pixel_offset < consumed {
        return Err(IoError::InvalidData(format!(
            "BMP pixel offset {} overlaps headers",
            pixel_offset
        )));
    }
    skip(&mut reader, pixel_offset - consumed)?;

    let lookup = |index: u8| -> IoResult<u32> {
        palette
            .get(index as usize)
            .copied()
            .ok_or_else(|| IoError::InvalidData(format!("palette index {} out of range", index)))
    };

    // BMP rows are 4-byte aligned
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let mut row_buffer = vec![0u8; row_stride];
    let mut pixels = vec![0u32; width as usize * height as usize];
    let mut any_alpha = false;

    for row in 0..height {
        reader.read_exact(&mut row_buffer).map_err(IoError::Io)?;
        let y = if top_down { row } else { height - 1 - row };
        let out = &mut pixels[y as usize * width as usize..(y as usize + 1) * width as usize];

        for (x, dst) in out.iter_mut().enumerate() {
            *dst = match bits_per_pixel {
                1 => lookup((row_buffer[x / 8] >> (7 - (x % 8))) & 1)?,
                4 => {
                    let byte = row_buffer[x / 2];
                    lookup(if x % 2 == 0 { byte >> 4 } else { byte & 0xF })?
                }
                8 => lookup(row_buffer[x])?,
                24 => {
                    let i = x * 3;
                    color::compose_rgb(row_buffer[i + 2], row_buffer[i + 1], row_buffer[i])
                }
                _ => {
                    let i = x * 4;
                    let a = row_buffer[i + 3];
                    any_alpha |= a != 0;
                    color::compose_rgba(row_buffer[i + 2], row_buffer[i + 1], row_buffer[i], a)
                }
            };
        }
    }

    // 32-bit BI_RGB files usually leave the fourth byte zeroed
    if bits_per_pixel == 32 && !any_alpha {
        for px in &mut pixels {
            *px |= color::ALPHA_MASK;
        }
    }

    Ok(PixelBuffer::from_data(width, height, pixels)?)
}

/// Write a BMP image as 24-bit RGB. Alpha is dropped.
pub fn write_bmp<W: Write>(pix: &PixelBuffer, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let bits_per_pixel: u16 = 24;

    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let pixel_data_size = row_stride * height as usize;
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize;
    let file_size = pixel_offset + pixel_data_size;
    let file_size = u32::try_from(file_size)
        .map_err(|_| IoError::EncodeError(format!("BMP too large: {} bytes", file_size)))?;

    let mut header = Vec::with_capacity(pixel_offset);
    header.extend_from_slice(b"BM");
    header.extend_from_slice(&file_size.to_le_bytes());
    header.extend_from_slice(&[0u8; 4]); // Reserved
    header.extend_from_slice(&(pixel_offset as u32).to_le_bytes());
    header.extend_from_slice(&BMP_INFO_HEADER_SIZE.to_le_bytes());
    header.extend_from_slice(&(width as i32).to_le_bytes());
    header.extend_from_slice(&(height as i32).to_le_bytes()); // Bottom-up
    header.extend_from_slice(&1u16.to_le_bytes()); // Planes
    header.extend_from_slice(&bits_per_pixel.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes()); // Compression
    header.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    header.extend_from_slice(&0i32.to_le_bytes()); // X pixels per meter
    header.extend_from_slice(&0i32.to_le_bytes()); // Y pixels per meter
    header.extend_from_slice(&0u32.to_le_bytes()); // Colors used
    header.extend_from_slice(&0u32.to_le_bytes()); // Important colors
    writer.write_all(&header).map_err(IoError::Io)?;

    let mut row_buffer = vec![0u8; row_stride];
    for row in 0..height {
        let y = height - 1 - row;
        for (x, &pixel) in pix.row(y).iter().enumerate() {
            let (r, g, b) = color::extract_rgb(pixel);
            let idx = x * 3;
            row_buffer[idx] = b;
            row_buffer[idx + 1] = g;
            row_buffer[idx + 2] = r;
        }
        writer.write_all(&row_buffer).map_err(IoError::Io)?;
    }

    Ok(())
}
