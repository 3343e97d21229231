//! Per-pixel similarity scan
//!
//! Both images are read over their common top-left overlap. Each pixel pair
//! contributes `|dR| + |dG| + |dB|` to the total delta, unless the pixels are
//! bit-identical or both fully transparent. The delta is normalized by the
//! largest possible sum, `overlap * 3 * 256`.
//!
//! The diff visualization is three panels wide:
//!
//! ```text
//! +-----------+-----------+-----------+
//! | reference |   delta   | candidate |
//! +-----------+-----------+-----------+
//! ```
//!
//! Delta pixels store `(128 + dC) & 0xff` per channel, so an unchanged
//! channel is mid gray, and the average of both alphas.

use crate::request::ComparisonRequest;
use crate::result::{ComparisonResult, SizeMismatchWarning};
use crate::CompareResult;
use goldenpix_core::{PixelBuffer, color};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Delta pixel for identical or jointly transparent pairs.
pub const NEUTRAL_DIFF_PIXEL: u32 = 0x0080_8080;

/// Bias added to each signed channel delta in the diff image.
pub const DIFF_BIAS: i32 = 128;

/// Number of color channels that contribute to the delta.
pub const CHANNELS: u64 = 3;

/// Number of levels per channel used to normalize the delta.
pub const LEVELS_PER_CHANNEL: u64 = 256;

/// Compare a pixel pair.
///
/// Returns the summed absolute channel difference and the delta pixel.
#[inline]
pub fn diff_pixel(candidate: u32, reference: u32) -> (u64, u32) {
    if candidate == reference
        || (color::is_transparent(candidate) && color::is_transparent(reference))
    {
        return (0, NEUTRAL_DIFF_PIXEL);
    }

    let (cr, cg, cb, ca) = color::extract_rgba(candidate);
    let (rr, rg, rb, ra) = color::extract_rgba(reference);
    let dr = cr as i32 - rr as i32;
    let dg = cg as i32 - rg as i32;
    let db = cb as i32 - rb as i32;

    let delta = (dr.unsigned_abs() + dg.unsigned_abs() + db.unsigned_abs()) as u64;
    let bias = |d: i32| ((DIFF_BIAS + d) & 0xff) as u8;
    let alpha = ((ca as u32 + ra as u32) / 2) as u8;
    (delta, color::compose_rgba(bias(dr), bias(dg), bias(db), alpha))
}

/// Sum of channel deltas over one overlap row.
fn row_delta(candidate: &[u32], reference: &[u32]) -> u64 {
    candidate
        .iter()
        .zip(reference)
        .map(|(&c, &r)| diff_pixel(c, r).0)
        .sum()
}

/// Fill one three-panel diff row and return its delta.
fn render_row(candidate: &[u32], reference: &[u32], out: &mut [u32]) -> u64 {
    let ow = candidate.len();
    let (left, rest) = out.split_at_mut(ow);
    let (middle, right) = rest.split_at_mut(ow);
    left.copy_from_slice(reference);
    right.copy_from_slice(candidate);

    let mut delta = 0;
    for ((&c, &r), dst) in candidate.iter().zip(reference).zip(middle.iter_mut()) {
        let (d, px) = diff_pixel(c, r);
        delta += d;
        *dst = px;
    }
    delta
}

struct Overlap<'a> {
    candidate: &'a PixelBuffer,
    reference: &'a PixelBuffer,
    width: u32,
    height: u32,
}

impl<'a> Overlap<'a> {
    fn new(candidate: &'a PixelBuffer, reference: &'a PixelBuffer) -> Self {
        Self {
            candidate,
            reference,
            width: candidate.width().min(reference.width()),
            height: candidate.height().min(reference.height()),
        }
    }

    fn rows(&self, y: u32) -> (&'a [u32], &'a [u32]) {
        let w = self.width as usize;
        (&self.candidate.row(y)[..w], &self.reference.row(y)[..w])
    }

    /// Total channel delta over the overlap.
    fn delta(&self) -> u64 {
        #[cfg(feature = "parallel")]
        let rows = (0..self.height).into_par_iter();
        #[cfg(not(feature = "parallel"))]
        let rows = 0..self.height;

        rows.map(|y| {
            let (c, r) = self.rows(y);
            row_delta(c, r)
        })
        .sum()
    }

    /// Render the diff visualization, returning it with the total delta.
    fn render(&self) -> CompareResult<(PixelBuffer, u64)> {
        let stride = 3 * self.width as usize;
        let mut data = vec![0u32; stride * self.height as usize];

        #[cfg(feature = "parallel")]
        let chunks = data.par_chunks_mut(stride);
        #[cfg(not(feature = "parallel"))]
        let chunks = data.chunks_mut(stride);

        let delta: u64 = chunks
            .enumerate()
            .map(|(y, out)| {
                let (c, r) = self.rows(y as u32);
                render_row(c, r, out)
            })
            .sum();

        let diff = PixelBuffer::from_data(3 * self.width, self.height, data)?;
        Ok((diff, delta))
    }

    fn percent(&self, delta: u64) -> f64 {
        let total = self.width as u64 * self.height as u64 * CHANNELS * LEVELS_PER_CHANNEL;
        (delta as f64 * 100.0) / total as f64
    }
}

/// Compare the candidate against the reference
///
/// Differing dimensions never fail: the top-left overlap is compared and a
/// [`SizeMismatchWarning`] is attached to the result.
///
/// The diff image is rendered when the request asks for it or when the
/// comparison fails.
pub fn compare(request: &ComparisonRequest<'_>) -> ComparisonResult {
    let candidate = request.candidate();
    let reference = request.reference();
    let overlap = Overlap::new(candidate, reference);

    let size_mismatch = if candidate.sizes_equal(reference) {
        None
    } else {
        let warning = SizeMismatchWarning {
            candidate: candidate.dimensions(),
            reference: reference.dimensions(),
        };
        log::warn!("{}", warning);
        Some(warning)
    };

    let max = request.max_difference_percent();
    let (delta, mut diff) = if request.want_diff_image() {
        match overlap.render() {
            Ok((diff, delta)) => (delta, Some(diff)),
            Err(e) => {
                log::warn!("could not render diff image: {}", e);
                (overlap.delta(), None)
            }
        }
    } else {
        (overlap.delta(), None)
    };

    let percent = overlap.percent(delta);
    let passed = percent <= max;

    if !passed && diff.is_none() {
        match overlap.render() {
            Ok((image, _)) => diff = Some(image),
            Err(e) => log::warn!("could not render diff image: {}", e),
        }
    }

    log::debug!(
        "compared {}x{} overlap: delta {}, {:.4}% (max {}%), {}",
        overlap.width,
        overlap.height,
        delta,
        percent,
        max,
        if passed { "pass" } else { "fail" }
    );

    ComparisonResult {
        percent_difference: percent,
        passed,
        diff,
        size_mismatch,
    }
}

/// Compare two buffers without going through the builder
///
/// # Arguments
/// * `candidate` - Freshly captured image
/// * `reference` - Golden image
/// * `max_difference_percent` - Largest difference that still passes
/// * `want_diff_image` - Render the diff image even on success
///
/// # Errors
///
/// Returns [`crate::CompareError::InvalidThreshold`] for a threshold
/// outside `[0, 100]`.
pub fn compare_buffers(
    candidate: &PixelBuffer,
    reference: &PixelBuffer,
    max_difference_percent: f64,
    want_diff_image: bool,
) -> CompareResult<ComparisonResult> {
    let request = ComparisonRequest::builder()
        .candidate(candidate)
        .reference(reference)
        .max_difference_percent(max_difference_percent)
        .want_diff_image(want_diff_image)
        .build()?;
    Ok(compare(&request))
}
