//! goldenpix-compare - Golden image similarity engine
//!
//! Scores how far a candidate image has drifted from a reference image:
//!
//! - Channel-wise absolute delta over the common overlap
//! - One aggregate percentage, checked against a threshold
//! - A side-by-side diff visualization for debugging failures
//!
//! # Examples
//!
//! ```
//! use goldenpix_compare::compare_buffers;
//! use goldenpix_core::PixelBuffer;
//!
//! let golden = PixelBuffer::new_filled(10, 10, 0xff00_0000).unwrap();
//! let shot = PixelBuffer::new_filled(10, 10, 0xffff_ffff).unwrap();
//! let result = compare_buffers(&shot, &golden, 0.7, false).unwrap();
//! assert!(!result.passed());
//! assert_eq!(result.message().unwrap(), "Images differ (by 99.6%)");
//! ```
//!
//! Enable the `parallel` feature to scan rows with rayon.

pub mod engine;
mod error;
pub mod request;
pub mod result;

pub use engine::{
    CHANNELS, DIFF_BIAS, LEVELS_PER_CHANNEL, NEUTRAL_DIFF_PIXEL, compare, compare_buffers,
    diff_pixel,
};
pub use error::{CompareError, CompareResult};
pub use request::{ComparisonRequest, ComparisonRequestBuilder, DEFAULT_MAX_DIFFERENCE_PERCENT};
pub use result::{ComparisonResult, SizeMismatchWarning, percent_label};
