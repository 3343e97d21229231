//! Comparison outcomes

use crate::{CompareError, CompareResult};
use goldenpix_core::PixelBuffer;
use std::fmt;

/// The candidate and reference dimensions did not match
///
/// Only the top-left overlap of the two images was compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatchWarning {
    /// Candidate `(width, height)`
    pub candidate: (u32, u32),
    /// Reference `(width, height)`
    pub reference: (u32, u32),
}

impl SizeMismatchWarning {
    /// Dimensions of the compared overlap.
    pub fn overlap(&self) -> (u32, u32) {
        (
            self.candidate.0.min(self.reference.0),
            self.candidate.1.min(self.reference.1),
        )
    }
}

impl fmt::Display for SizeMismatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ow, oh) = self.overlap();
        write!(
            f,
            "image sizes differ: candidate {}x{}, reference {}x{}; compared {}x{} overlap",
            self.candidate.0, self.candidate.1, self.reference.0, self.reference.1, ow, oh
        )
    }
}

/// Outcome of one comparison
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub(crate) percent_difference: f64,
    pub(crate) passed: bool,
    pub(crate) diff: Option<PixelBuffer>,
    pub(crate) size_mismatch: Option<SizeMismatchWarning>,
}

impl ComparisonResult {
    /// Aggregate difference in percent, within `[0, 100]`.
    pub fn percent_difference(&self) -> f64 {
        self.percent_difference
    }

    /// Whether the difference is within the allowed threshold.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The side-by-side diff visualization, if it was rendered.
    ///
    /// Layout: reference | delta | candidate, each `overlap` wide.
    pub fn diff_image(&self) -> Option<&PixelBuffer> {
        self.diff.as_ref()
    }

    /// Take ownership of the diff visualization.
    pub fn into_diff_image(self) -> Option<PixelBuffer> {
        self.diff
    }

    /// Set when the two images had different dimensions.
    pub fn size_mismatch(&self) -> Option<&SizeMismatchWarning> {
        self.size_mismatch.as_ref()
    }

    /// Failure message, `None` when the comparison passed.
    pub fn message(&self) -> Option<String> {
        if self.passed {
            None
        } else {
            Some(format!(
                "Images differ (by {}%)",
                percent_label(self.percent_difference)
            ))
        }
    }

    /// Turn a failed comparison into [`CompareError::ImagesDiffer`].
    pub fn into_result(self) -> CompareResult<Self> {
        if self.passed {
            Ok(self)
        } else {
            Err(CompareError::ImagesDiffer {
                percent: self.percent_difference,
                diff: self.diff.map(Box::new),
            })
        }
    }
}

/// Format a percentage with one decimal, rounding ties away from zero.
///
/// Rounding works on the shortest decimal form of the value, so `0.25`
/// gives `"0.3"` and `0.15` gives `"0.2"`.
pub fn percent_label(percent: f64) -> String {
    let fallback = || format!("{:.1}", percent);
    if !percent.is_finite() || percent.abs() >= 1e15 {
        return fallback();
    }
    let digits = percent.abs().to_string();
    let (int, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let Ok(int) = int.parse::<u64>() else {
        return fallback();
    };
    let mut frac = frac.bytes().map(|b| (b - b'0') as u64);
    let tenths = frac.next().unwrap_or(0);
    let round_up = frac.next().is_some_and(|d| d >= 5);
    let scaled = int * 10 + tenths + u64::from(round_up);
    let sign = if percent.is_sign_negative() && scaled > 0 { "-" } else { "" };
    format!("{}{}.{}", sign, scaled / 10, scaled % 10)
}
