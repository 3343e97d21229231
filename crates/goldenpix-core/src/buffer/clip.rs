//! Rectangle clipping

use super::PixelBuffer;
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Extract a rectangular region.
    ///
    /// The rectangle is clipped to the image bounds, so the result may be
    /// smaller than `w x h`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `w` or `h` is zero or the
    /// origin lies outside the image.
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<PixelBuffer> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {}x{}",
                w, h
            )));
        }
        if x >= self.width || y >= self.height {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({}, {}) is outside image bounds ({}x{})",
                x, y, self.width, self.height
            )));
        }

        let clip_w = w.min(self.width - x);
        let clip_h = h.min(self.height - y);

        let mut data = Vec::with_capacity(clip_w as usize * clip_h as usize);
        for row in y..y + clip_h {
            let src = self.row(row);
            data.extend_from_slice(&src[x as usize..(x + clip_w) as usize]);
        }
        PixelBuffer::from_data(clip_w, clip_h, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_data(w, h, (0..w * h).collect()).unwrap()
    }

    #[test]
    fn test_clip_rectangle() {
        let pix = numbered(4, 4);
        let clip = pix.clip_rectangle(1, 1, 2, 2).unwrap();
        assert_eq!(clip.dimensions(), (2, 2));
        assert_eq!(clip.data(), &[5, 6, 9, 10]);
    }

    #[test]
    fn test_clip_rectangle_clamped() {
        let pix = numbered(4, 4);
        let clip = pix.clip_rectangle(3, 2, 10, 10).unwrap();
        assert_eq!(clip.dimensions(), (1, 2));
        assert_eq!(clip.data(), &[11, 15]);
    }

    #[test]
    fn test_clip_rectangle_invalid() {
        let pix = numbered(4, 4);
        assert!(pix.clip_rectangle(0, 0, 0, 2).is_err());
        assert!(pix.clip_rectangle(4, 0, 1, 1).is_err());
    }
}
