//! goldenpix - Golden image regression matching
//!
//! Compares a freshly captured snapshot of rendered UI against a stored
//! "golden" image and flags visual drift beyond a tolerance.
//!
//! # Overview
//!
//! - Image I/O (PNG, JPEG, BMP)
//! - Thumbnail normalization (sampling, area mapping, center crop)
//! - Channel-wise similarity scoring with a side-by-side diff image
//! - Golden file matching with generate mode and failure artifacts
//!
//! # Example
//!
//! ```
//! use goldenpix::PixelBuffer;
//! use goldenpix::compare::compare_buffers;
//!
//! let golden = PixelBuffer::new_filled(500, 500, 0xffff_0000).unwrap();
//! let shot = golden.clone();
//! let result = compare_buffers(&shot, &golden, 0.7, false).unwrap();
//! assert!(result.passed());
//! assert_eq!(result.percent_difference(), 0.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use goldenpix_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use goldenpix_compare as compare;
pub use goldenpix_io as io;
pub use goldenpix_test as matcher;
pub use goldenpix_transform as transform;

// The names most callers need
pub use goldenpix_compare::{CompareError, ComparisonRequest, ComparisonResult};
pub use goldenpix_test::{Capture, GoldenMatcher, MatchConfig, MatchError, MatchMode, MatchReport};
