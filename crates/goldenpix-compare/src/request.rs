//! Comparison requests

use crate::{CompareError, CompareResult};
use goldenpix_core::PixelBuffer;

/// Default allowed difference, in percent.
pub const DEFAULT_MAX_DIFFERENCE_PERCENT: f64 = 0.7;

/// A validated pair of images plus the pass/fail threshold
///
/// Borrowed buffers are only read by the engine.
///
/// # Examples
///
/// ```
/// use goldenpix_compare::ComparisonRequest;
/// use goldenpix_core::PixelBuffer;
///
/// let a = PixelBuffer::new_filled(4, 4, 0xff00_0000).unwrap();
/// let b = a.clone();
/// let req = ComparisonRequest::builder()
///     .candidate(&a)
///     .reference(&b)
///     .max_difference_percent(1.0)
///     .build()
///     .unwrap();
/// assert_eq!(req.max_difference_percent(), 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ComparisonRequest<'a> {
    candidate: &'a PixelBuffer,
    reference: &'a PixelBuffer,
    max_difference_percent: f64,
    want_diff_image: bool,
}

impl<'a> ComparisonRequest<'a> {
    /// Start building a request.
    pub fn builder() -> ComparisonRequestBuilder<'a> {
        ComparisonRequestBuilder::default()
    }

    /// The freshly captured image.
    pub fn candidate(&self) -> &'a PixelBuffer {
        self.candidate
    }

    /// The golden image.
    pub fn reference(&self) -> &'a PixelBuffer {
        self.reference
    }

    /// Largest difference percentage that still passes.
    pub fn max_difference_percent(&self) -> f64 {
        self.max_difference_percent
    }

    /// Whether the diff visualization is rendered even on success.
    pub fn want_diff_image(&self) -> bool {
        self.want_diff_image
    }
}

/// Builder for [`ComparisonRequest`]
#[derive(Debug, Clone)]
pub struct ComparisonRequestBuilder<'a> {
    candidate: Option<&'a PixelBuffer>,
    reference: Option<&'a PixelBuffer>,
    max_difference_percent: f64,
    want_diff_image: bool,
}

impl Default for ComparisonRequestBuilder<'_> {
    fn default() -> Self {
        Self {
            candidate: None,
            reference: None,
            max_difference_percent: DEFAULT_MAX_DIFFERENCE_PERCENT,
            want_diff_image: false,
        }
    }
}

impl<'a> ComparisonRequestBuilder<'a> {
    /// Set the freshly captured image.
    pub fn candidate(mut self, pix: &'a PixelBuffer) -> Self {
        self.candidate = Some(pix);
        self
    }

    /// Set the golden image.
    pub fn reference(mut self, pix: &'a PixelBuffer) -> Self {
        self.reference = Some(pix);
        self
    }

    /// Set the largest difference percentage that still passes.
    pub fn max_difference_percent(mut self, percent: f64) -> Self {
        self.max_difference_percent = percent;
        self
    }

    /// Render the diff visualization even when the comparison passes.
    pub fn want_diff_image(mut self, want: bool) -> Self {
        self.want_diff_image = want;
        self
    }

    /// Validate and build the request.
    ///
    /// # Errors
    ///
    /// - [`CompareError::NullInput`] if either image is missing
    /// - [`CompareError::InvalidThreshold`] if the threshold is NaN or
    ///   outside `[0, 100]`
    pub fn build(self) -> CompareResult<ComparisonRequest<'a>> {
        let candidate = self.candidate.ok_or(CompareError::NullInput("candidate"))?;
        let reference = self.reference.ok_or(CompareError::NullInput("reference"))?;
        let max = self.max_difference_percent;
        if !(0.0..=100.0).contains(&max) {
            return Err(CompareError::InvalidThreshold(max));
        }
        Ok(ComparisonRequest {
            candidate,
            reference,
            max_difference_percent: max,
            want_diff_image: self.want_diff_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let pix = PixelBuffer::new(2, 2).unwrap();
        let req = ComparisonRequest::builder()
            .candidate(&pix)
            .reference(&pix)
            .build()
            .unwrap();
        assert_eq!(req.max_difference_percent(), DEFAULT_MAX_DIFFERENCE_PERCENT);
        assert!(!req.want_diff_image());
    }

    #[test]
    fn test_builder_missing_input() {
        let pix = PixelBuffer::new(2, 2).unwrap();
        let err = ComparisonRequest::builder().reference(&pix).build().unwrap_err();
        assert!(matches!(err, CompareError::NullInput("candidate")));
        let err = ComparisonRequest::builder().candidate(&pix).build().unwrap_err();
        assert!(matches!(err, CompareError::NullInput("reference")));
    }

    #[test]
    fn test_builder_threshold_range() {
        let pix = PixelBuffer::new(2, 2).unwrap();
        let base = ComparisonRequest::builder().candidate(&pix).reference(&pix);
        for bad in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            let err = base.clone().max_difference_percent(bad).build().unwrap_err();
            assert!(matches!(err, CompareError::InvalidThreshold(_)));
        }
        for good in [0.0, 0.7, 100.0] {
            assert!(base.clone().max_difference_percent(good).build().is_ok());
        }
    }
}
