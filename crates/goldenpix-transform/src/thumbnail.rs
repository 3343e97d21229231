//! Thumbnail normalization
//!
//! Candidate and golden images rarely share a resolution. Both are brought
//! to a bounded thumbnail before comparison:
//!
//! - [`thumbnail`] scales so that the longest side equals the target
//! - [`extract_thumbnail`] scales to cover an exact size and center-crops

use crate::scale::{ScaleMethod, scale_to_size};
use crate::{TransformError, TransformResult};
use goldenpix_core::PixelBuffer;

/// Default length of the longest thumbnail side, in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 500;

/// Compute thumbnail dimensions for a `width x height` source.
///
/// `scale = target / max(width, height)`, and each side is
/// `floor(scale * side)`. The longest side is exactly `target`.
///
/// # Errors
///
/// - [`TransformError::InvalidParameters`] if `target` is 0
/// - [`TransformError::Shape`] if the shorter side collapses to 0
pub fn thumbnail_dimensions(width: u32, height: u32, target: u32) -> TransformResult<(u32, u32)> {
    if target == 0 {
        return Err(TransformError::InvalidParameters(
            "thumbnail target size must be > 0".to_string(),
        ));
    }
    if width == 0 || height == 0 {
        return Err(TransformError::Shape { width, height });
    }

    let longest = width.max(height);
    // Integer form of floor(target / longest * side); exact for the longest side.
    let side = |s: u32| (s as u64 * target as u64 / longest as u64) as u32;
    let (w, h) = (side(width), side(height));
    if w == 0 || h == 0 {
        return Err(TransformError::Shape {
            width: w,
            height: h,
        });
    }
    Ok((w, h))
}

/// Scale an image so that its longest side equals `target`
///
/// Uses nearest-neighbor sampling. The aspect ratio is preserved up to
/// truncation of the shorter side.
///
/// # Arguments
/// * `pix` - Input image
/// * `target` - Length of the longest output side
pub fn thumbnail(pix: &PixelBuffer, target: u32) -> TransformResult<PixelBuffer> {
    thumbnail_with_method(pix, target, ScaleMethod::Sampling)
}

/// Scale an image so that its longest side equals `target`
///
/// # Arguments
/// * `pix` - Input image
/// * `target` - Length of the longest output side
/// * `method` - Scaling algorithm to use
pub fn thumbnail_with_method(
    pix: &PixelBuffer,
    target: u32,
    method: ScaleMethod,
) -> TransformResult<PixelBuffer> {
    let (w, h) = thumbnail_dimensions(pix.width(), pix.height(), target)?;
    scale_to_size(pix, w, h, method)
}

/// Produce a thumbnail of exactly `width x height`
///
/// The source is scaled by `max(width / src_w, height / src_h)` so that it
/// covers the requested box, then the center is cropped out.
///
/// # Arguments
/// * `pix` - Input image
/// * `width` - Output width
/// * `height` - Output height
pub fn extract_thumbnail(pix: &PixelBuffer, width: u32, height: u32) -> TransformResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "thumbnail size must be non-zero: {}x{}",
            width, height
        )));
    }

    let (sw, sh) = pix.dimensions();
    let scale = (width as f64 / sw as f64).max(height as f64 / sh as f64);
    let scaled_w = ((scale * sw as f64).round() as u32).max(width);
    let scaled_h = ((scale * sh as f64).round() as u32).max(height);

    let scaled = scale_to_size(pix, scaled_w, scaled_h, ScaleMethod::Sampling)?;
    if scaled_w == width && scaled_h == height {
        return Ok(scaled);
    }
    let x = (scaled_w - width) / 2;
    let y = (scaled_h - height) / 2;
    Ok(scaled.clip_rectangle(x, y, width, height)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldenpix_core::color;

    #[test]
    fn test_dimensions_portrait() {
        assert_eq!(thumbnail_dimensions(1000, 2000, 500).unwrap(), (250, 500));
        assert_eq!(thumbnail_dimensions(2000, 1000, 500).unwrap(), (500, 250));
    }

    #[test]
    fn test_dimensions_floor() {
        // 500 / 1366 * 768 = 281.1...
        assert_eq!(thumbnail_dimensions(1366, 768, 500).unwrap(), (500, 281));
        // Upscaling follows the same rule
        assert_eq!(thumbnail_dimensions(100, 30, 500).unwrap(), (500, 150));
    }

    #[test]
    fn test_dimensions_errors() {
        assert!(matches!(
            thumbnail_dimensions(10, 10, 0),
            Err(TransformError::InvalidParameters(_))
        ));
        assert!(matches!(
            thumbnail_dimensions(5000, 1, 500),
            Err(TransformError::Shape { width: 500, height: 0 })
        ));
    }

    #[test]
    fn test_thumbnail_does_not_mutate_source() {
        let pix = PixelBuffer::new_filled(40, 20, color::WHITE).unwrap();
        let before = pix.clone();
        let thumb = thumbnail(&pix, 10).unwrap();
        assert_eq!(thumb.dimensions(), (10, 5));
        assert_eq!(pix, before);
    }

    #[test]
    fn test_thumbnail_same_size_is_identity() {
        let pix = PixelBuffer::from_data(5, 3, (0..15).collect()).unwrap();
        assert_eq!(thumbnail(&pix, 5).unwrap(), pix);
        assert_eq!(
            thumbnail_with_method(&pix, 5, ScaleMethod::AreaMap).unwrap(),
            pix
        );
    }

    #[test]
    fn test_extract_thumbnail_center_crop() {
        // 4x2 source into 2x2: no scaling, crop columns 1..3
        let pix = PixelBuffer::from_data(4, 2, (0..8).collect()).unwrap();
        let t = extract_thumbnail(&pix, 2, 2).unwrap();
        assert_eq!(t.data(), &[1, 2, 5, 6]);
    }

    #[test]
    fn test_extract_thumbnail_exact_size() {
        let pix = PixelBuffer::new_filled(1000, 2000, color::BLACK).unwrap();
        let t = extract_thumbnail(&pix, 250, 500).unwrap();
        assert_eq!(t.dimensions(), (250, 500));
        let t = extract_thumbnail(&pix, 300, 300).unwrap();
        assert_eq!(t.dimensions(), (300, 300));
        assert!(extract_thumbnail(&pix, 0, 10).is_err());
    }
}
