//! goldenpix-test - Golden image matching and regression test framework
//!
//! Two layers live here:
//!
//! - [`GoldenMatcher`] checks a captured image against a stored golden
//!   image and saves failure artifacts
//! - [`RegParams`] drives numbered regression checks in integration tests
//!
//! Both honor three modes:
//!
//! - **Compare**: Compare results with golden files (default)
//! - **Generate**: Create golden files for comparison
//! - **Display**: Run without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use goldenpix_test::{GoldenMatcher, MatchConfig};
//!
//! let config = MatchConfig::default().with_artifact_dir("target/goldenpix");
//! let report = GoldenMatcher::from_env("tests/golden/login.png")
//!     .with_config(config)
//!     .matches_capture(&mut || take_screenshot())?;
//! assert!(report.passed(), "{}", report.describe());
//! ```
//!
//! # Environment Variables
//!
//! - `GOLDENPIX_MODE`: Set to "generate", "compare", or "display"

pub mod artifacts;
mod capture;
mod config;
mod error;
pub mod fixtures;
mod loader;
mod matcher;
mod params;

pub use artifacts::{ArtifactSet, ArtifactWriter};
pub use capture::{Capture, FileCapture};
pub use config::{ARTIFACT_JPEG_QUALITY, MODE_ENV_VAR, MatchConfig, MatchMode};
pub use error::{MatchError, MatchResult};
pub use loader::{load_golden, load_thumbnail};
pub use matcher::{GoldenMatcher, MatchOutcome, MatchReport};
pub use params::RegParams;

use std::path::PathBuf;

/// Get the path to the workspace root
fn workspace_root() -> PathBuf {
    // goldenpix-test is at crates/goldenpix-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Get the path to the golden files directory
pub fn golden_dir() -> PathBuf {
    workspace_root().join("tests/golden")
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests/regout")
}
