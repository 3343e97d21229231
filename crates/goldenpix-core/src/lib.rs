//! goldenpix-core - Pixel buffer model for golden-image matching
//!
//! This crate provides the data structures shared by every goldenpix crate:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - 32-bit ARGB raster (immutable / mutable)
//! - [`ImageFormat`] - Encoded file formats understood by `goldenpix-io`
//! - [`color`] - Packing helpers for 32-bit pixels
//! - [`Error`] / [`Result`] - Construction and access errors

pub mod buffer;
pub mod error;

pub use buffer::{ImageFormat, PixelBuffer, PixelBufferMut};
pub use error::{Error, Result};

/// Color channel helpers for packed 32-bit pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0xAARRGGBB` (alpha in MSB, blue in LSB), 8 bits per
/// channel, non-premultiplied.
pub mod color {
    /// Shift amounts for extracting color channels
    pub const ALPHA_SHIFT: u32 = 24;
    pub const RED_SHIFT: u32 = 16;
    pub const GREEN_SHIFT: u32 = 8;
    pub const BLUE_SHIFT: u32 = 0;

    /// Mask selecting the alpha byte of a packed pixel.
    pub const ALPHA_MASK: u32 = 0xff << ALPHA_SHIFT;

    /// Fully transparent black.
    pub const TRANSPARENT: u32 = 0x0000_0000;
    /// Opaque black.
    pub const BLACK: u32 = 0xff00_0000;
    /// Opaque white.
    pub const WHITE: u32 = 0xffff_ffff;

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque 32-bit pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit pixel from RGBA components.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((a as u32) << ALPHA_SHIFT)
            | ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Whether the pixel is fully transparent.
    #[inline]
    pub fn is_transparent(pixel: u32) -> bool {
        pixel & ALPHA_MASK == 0
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_argb_layout() {
            let red_px = 0xffff_0000;
            assert_eq!(extract_rgba(red_px), (255, 0, 0, 255));
            assert_eq!(compose_rgb(255, 0, 0), red_px);
        }

        #[test]
        fn test_compose_extract() {
            let px = compose_rgba(0x12, 0x34, 0x56, 0x78);
            assert_eq!(px, 0x7812_3456);
            assert_eq!(alpha(px), 0x78);
            assert_eq!(red(px), 0x12);
            assert_eq!(green(px), 0x34);
            assert_eq!(blue(px), 0x56);
            assert_eq!(extract_rgb(px), (0x12, 0x34, 0x56));
        }

        #[test]
        fn test_transparency() {
            assert!(is_transparent(TRANSPARENT));
            assert!(is_transparent(0x00ff_ffff));
            assert!(!is_transparent(BLACK));
            assert!(!is_transparent(0x0100_0000));
        }
    }
}
