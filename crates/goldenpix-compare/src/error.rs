//! Error types for goldenpix-compare

use crate::result::percent_label;
use goldenpix_core::PixelBuffer;
use thiserror::Error;

/// Errors produced while building or evaluating a comparison
#[derive(Debug, Error)]
pub enum CompareError {
    /// The candidate or the reference image was never supplied
    #[error("missing {0} image")]
    NullInput(&'static str),

    /// The allowed difference is not a percentage
    #[error("max difference percent must be within [0, 100], got {0}")]
    InvalidThreshold(f64),

    /// The images differ by more than the allowed percentage
    ///
    /// This is the expected failure signal of a regression check. The diff
    /// visualization is attached when it was rendered.
    #[error("Images differ (by {}%)", percent_label(*.percent))]
    ImagesDiffer {
        percent: f64,
        diff: Option<Box<PixelBuffer>>,
    },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] goldenpix_core::Error),
}

/// Result type for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;
