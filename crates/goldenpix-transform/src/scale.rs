//! Image scaling operations
//!
//! Provides two deterministic resampling kernels:
//! - Sampling (nearest neighbor, center aligned)
//! - Area mapping (box average over each destination pixel's footprint)
//!
//! [`scale_to_size`] returns a pixel-identical copy when the destination size
//! equals the source size.

use crate::{TransformError, TransformResult};
use goldenpix_core::{PixelBuffer, color};

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    #[default]
    Sampling,
    /// Area mapping (best for downscaling, anti-aliased)
    AreaMap,
}

/// Resample an image to exactly `width x height`
///
/// Returns an unchanged copy when the size already matches.
///
/// # Arguments
/// * `pix` - Input image
/// * `width` - Target width
/// * `height` - Target height
/// * `method` - Scaling algorithm to use
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if either side is 0.
pub fn scale_to_size(
    pix: &PixelBuffer,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size must be non-zero: {}x{}",
            width, height
        )));
    }
    if pix.width() == width && pix.height() == height {
        return Ok(pix.clone());
    }
    match method {
        ScaleMethod::Sampling => resize_sampling(pix, width, height),
        ScaleMethod::AreaMap => resize_area_map(pix, width, height),
    }
}

/// Center-aligned nearest source index for each destination index.
fn sample_map(src: u32, dst: u32) -> Vec<u32> {
    (0..dst as u64)
        .map(|d| (((2 * d + 1) * src as u64) / (2 * dst as u64)) as u32)
        .collect()
}

/// Half-open source span `[start, end)` covered by each destination index.
///
/// Spans are never empty: when enlarging, the span collapses to the
/// nearest source index.
fn area_map(src: u32, dst: u32) -> Vec<(u32, u32)> {
    let nearest = sample_map(src, dst);
    (0..dst as u64)
        .map(|d| {
            let start = (d * src as u64 / dst as u64) as u32;
            let end = ((d + 1) * src as u64 / dst as u64) as u32;
            if end > start {
                (start, end)
            } else {
                let n = nearest[d as usize];
                (n, n + 1)
            }
        })
        .collect()
}

fn resize_sampling(pix: &PixelBuffer, width: u32, height: u32) -> TransformResult<PixelBuffer> {
    let xmap = sample_map(pix.width(), width);
    let ymap = sample_map(pix.height(), height);

    let mut data = Vec::with_capacity(width as usize * height as usize);
    for &sy in &ymap {
        let src_row = pix.row(sy);
        data.extend(xmap.iter().map(|&sx| src_row[sx as usize]));
    }
    Ok(PixelBuffer::from_data(width, height, data)?)
}

fn resize_area_map(pix: &PixelBuffer, width: u32, height: u32) -> TransformResult<PixelBuffer> {
    let xspans = area_map(pix.width(), width);
    let yspans = area_map(pix.height(), height);

    let mut data = Vec::with_capacity(width as usize * height as usize);
    for &(y0, y1) in &yspans {
        for &(x0, x1) in &xspans {
            let mut sums = [0u64; 4];
            for sy in y0..y1 {
                for &px in &pix.row(sy)[x0 as usize..x1 as usize] {
                    let (r, g, b, a) = color::extract_rgba(px);
                    sums[0] += r as u64;
                    sums[1] += g as u64;
                    sums[2] += b as u64;
                    sums[3] += a as u64;
                }
            }
            let n = ((y1 - y0) as u64) * ((x1 - x0) as u64);
            let avg = |s: u64| ((s + n / 2) / n) as u8;
            data.push(color::compose_rgba(
                avg(sums[0]),
                avg(sums[1]),
                avg(sums[2]),
                avg(sums[3]),
            ));
        }
    }
    Ok(PixelBuffer::from_data(width, height, data)?)
}
