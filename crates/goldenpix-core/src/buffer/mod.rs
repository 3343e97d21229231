//! PixelBuffer - The raster container
//!
//! `PixelBuffer` is the single image type handled by goldenpix. Every
//! buffer has the same fixed layout, so no depth or colormap bookkeeping is
//! needed anywhere downstream.
//!
//! # Pixel layout
//!
//! - One packed `u32` per pixel, `0xAARRGGBB`
//! - Rows are stored top to bottom with no padding
//! - `data.len() == width * height` always holds
//!
//! # Ownership model
//!
//! A `PixelBuffer` is owned by whoever holds it and is never mutated after
//! construction. Pixels are written through [`PixelBufferMut`], which is
//! converted back with `Into<PixelBuffer>` once filled.

mod access;
mod clip;

use crate::color;
use crate::error::{Error, Result};

/// Encoded image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// BMP format
    Bmp,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Self::Bmp,
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            _ => Self::Unknown,
        }
    }
}

/// Check dimensions and return the pixel count.
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })
}

/// Immutable 32-bit ARGB raster
///
/// # Examples
///
/// ```
/// use goldenpix_core::PixelBuffer;
///
/// let pix = PixelBuffer::new_filled(640, 480, 0xffff_0000).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.get_pixel(10, 10), Some(0xffff_0000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl PixelBuffer {
    /// Create a new buffer filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, color::TRANSPARENT)
    }

    /// Create a new buffer with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        let count = pixel_count(width, height)?;
        Ok(PixelBuffer {
            width,
            height,
            data: vec![pixel; count],
        })
    }

    /// Wrap existing row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }

    /// Build a buffer from interleaved 8-bit RGBA samples.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if bytes.len() != expected * 4 {
            return Err(Error::BufferLength {
                expected: expected * 4,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|c| color::compose_rgba(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Consume the buffer and return its pixel data.
    pub fn into_data(self) -> Vec<u32> {
        self.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks_exact(self.width as usize)
    }

    /// Whether two buffers have the same width and height.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Length of the longer side.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Interleaved 8-bit RGBA samples, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for &px in &self.data {
            let (r, g, b, a) = color::extract_rgba(px);
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }

    /// Interleaved 8-bit RGB samples, row-major. Alpha is dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 3);
        for &px in &self.data {
            let (r, g, b) = color::extract_rgb(px);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    /// Whether any pixel has alpha below 255.
    pub fn has_transparency(&self) -> bool {
        self.data.iter().any(|&px| color::alpha(px) != 255)
    }

    /// Create a mutable copy of this buffer.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: self.clone(),
        }
    }

    /// Convert into a mutable buffer without copying.
    pub fn into_mut(self) -> PixelBufferMut {
        PixelBufferMut { inner: self }
    }
}

/// Mutable pixel buffer
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`PixelBuffer`] using `Into<PixelBuffer>`.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: PixelBuffer,
}

impl PixelBufferMut {
    /// Create a new mutable buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixelBuffer::new(width, height)?.into_mut())
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set every pixel to `pixel`.
    pub fn fill(&mut self, pixel: u32) {
        self.inner.data.fill(pixel);
    }

    /// Clear all pixels to transparent black.
    pub fn clear(&mut self) {
        self.fill(color::TRANSPARENT);
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(pix_mut: PixelBufferMut) -> Self {
        pix_mut.inner
    }
}
