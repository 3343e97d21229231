//! Decode-and-normalize helpers

use crate::error::{MatchError, MatchResult};
use goldenpix_core::PixelBuffer;
use goldenpix_transform::{extract_thumbnail, thumbnail};
use std::path::Path;

/// Decode encoded image bytes and scale the result to a thumbnail whose
/// longest side is `target`.
pub fn load_thumbnail(bytes: &[u8], target: u32) -> MatchResult<PixelBuffer> {
    let pix = goldenpix_io::read_image_mem(bytes)?;
    Ok(thumbnail(&pix, target)?)
}

/// Load a golden image as an exact `width x height` thumbnail.
///
/// Large files are subsampled while decoding, then scaled to cover the
/// requested size and center-cropped.
pub fn load_golden(path: &Path, width: u32, height: u32) -> MatchResult<PixelBuffer> {
    let pix = goldenpix_io::read_image_sampled(path, width, height).map_err(|e| {
        MatchError::ImageLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(extract_thumbnail(&pix, width, height)?)
}
