//! Synthetic test images
//!
//! All fixtures are opaque and deterministic, so tests need no binary data.
//!
//! # Panics
//!
//! Every constructor panics on a zero width or height.

use goldenpix_core::{ImageFormat, PixelBuffer, PixelBufferMut, color};

fn canvas(width: u32, height: u32) -> PixelBufferMut {
    PixelBufferMut::new(width, height)
        .unwrap_or_else(|e| panic!("invalid fixture size {}x{}: {}", width, height, e))
}

/// An image filled with one pixel value.
pub fn solid(width: u32, height: u32, pixel: u32) -> PixelBuffer {
    let mut pm = canvas(width, height);
    pm.fill(pixel);
    pm.into()
}

/// Red ramps left to right, green top to bottom, blue is their complement.
///
/// The origin is `(0, 0, 255)` and the far corner `(255, 255, 0)`.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let ramp = |v: u32, len: u32| if len > 1 { v * 255 / (len - 1) } else { 0 };
    let mut pm = canvas(width, height);
    for y in 0..height {
        let g = ramp(y, height);
        for (x, px) in pm.row_mut(y).iter_mut().enumerate() {
            let r = ramp(x as u32, width);
            let b = 255 - (r + g) / 2;
            *px = color::compose_rgb(r as u8, g as u8, b as u8);
        }
    }
    pm.into()
}

/// Alternating square cells of two colors, starting with `a` at the origin.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: u32, b: u32) -> PixelBuffer {
    let cell = cell.max(1);
    let mut pm = canvas(width, height);
    for y in 0..height {
        for (x, px) in pm.row_mut(y).iter_mut().enumerate() {
            let even = ((x as u32 / cell) + (y / cell)) % 2 == 0;
            *px = if even { a } else { b };
        }
    }
    pm.into()
}

/// Encode a buffer as PNG bytes.
pub fn png_bytes(pix: &PixelBuffer) -> Vec<u8> {
    goldenpix_io::write_image_mem(pix, ImageFormat::Png)
        .unwrap_or_else(|e| panic!("PNG fixture encoding failed: {}", e))
}
