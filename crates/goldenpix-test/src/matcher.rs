//! Golden image matching
//!
//! A match runs the full pipeline:
//!
//! 1. Scale the candidate to a thumbnail (longest side `thumbnail_size`)
//! 2. Load the golden file at exactly the candidate thumbnail's size
//! 3. Compare the two with the similarity engine
//! 4. On failure, save both thumbnails and the diff as JPEG artifacts
//!
//! The [`MatchMode`] decides whether golden files are compared against,
//! regenerated, or ignored.

use crate::artifacts::ArtifactWriter;
use crate::capture::Capture;
use crate::config::{MatchConfig, MatchMode};
use crate::error::{MatchError, MatchResult};
use crate::loader::load_golden;
use goldenpix_compare::{ComparisonResult, compare_buffers, percent_label};
use goldenpix_core::{ImageFormat, PixelBuffer};
use goldenpix_transform::thumbnail;
use std::fs;
use std::path::{Path, PathBuf};

/// What a match did
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// The candidate was compared against the golden file
    Compared(ComparisonResult),
    /// The candidate thumbnail was written as the golden file
    Generated,
    /// No comparison took place (display mode or missing golden)
    Skipped,
}

/// Report of one golden match
#[derive(Debug, Clone)]
pub struct MatchReport {
    golden_path: PathBuf,
    outcome: MatchOutcome,
    artifacts: Vec<PathBuf>,
    artifact_errors: Vec<String>,
}

impl MatchReport {
    fn new(golden_path: &Path, outcome: MatchOutcome) -> Self {
        Self {
            golden_path: golden_path.to_path_buf(),
            outcome,
            artifacts: Vec::new(),
            artifact_errors: Vec::new(),
        }
    }

    /// Golden file this report refers to.
    pub fn golden_path(&self) -> &Path {
        &self.golden_path
    }

    /// What the match did.
    pub fn outcome(&self) -> &MatchOutcome {
        &self.outcome
    }

    /// The comparison result, if a comparison took place.
    pub fn comparison(&self) -> Option<&ComparisonResult> {
        match &self.outcome {
            MatchOutcome::Compared(result) => Some(result),
            _ => None,
        }
    }

    /// Failure artifacts that were written.
    pub fn artifacts(&self) -> &[PathBuf] {
        &self.artifacts
    }

    /// Artifacts that could not be written.
    pub fn artifact_errors(&self) -> &[String] {
        &self.artifact_errors
    }

    /// Whether the match passed. Generated and skipped matches pass.
    pub fn passed(&self) -> bool {
        self.comparison().is_none_or(ComparisonResult::passed)
    }

    /// Failure message, `None` when the match passed.
    pub fn message(&self) -> Option<String> {
        self.comparison().and_then(ComparisonResult::message)
    }

    /// One-line summary usable as an assertion message.
    pub fn describe(&self) -> String {
        let detail = match &self.outcome {
            MatchOutcome::Compared(result) => result.message().unwrap_or_else(|| {
                format!(
                    "Images match (differ by {}%)",
                    percent_label(result.percent_difference())
                )
            }),
            MatchOutcome::Generated => "Golden image generated".to_string(),
            MatchOutcome::Skipped => "Comparison skipped".to_string(),
        };
        format!(
            "with golden image from path: {}. {}",
            self.golden_path.display(),
            detail
        )
    }

    /// Turn a failed match into [`MatchError::Mismatch`].
    pub fn into_result(self) -> MatchResult<Self> {
        match self.message() {
            None => Ok(self),
            Some(message) => Err(MatchError::Mismatch {
                path: self.golden_path.display().to_string(),
                message,
            }),
        }
    }
}

/// Matches candidate images against one golden file
///
/// # Examples
///
/// ```no_run
/// use goldenpix_core::PixelBuffer;
/// use goldenpix_test::GoldenMatcher;
///
/// let shot = PixelBuffer::new_filled(1080, 1920, 0xffff_ffff).unwrap();
/// let report = GoldenMatcher::from_env("tests/golden/home.png")
///     .assert_matches(&shot)
///     .unwrap();
/// assert!(report.passed());
/// ```
#[derive(Debug, Clone)]
pub struct GoldenMatcher {
    golden_path: PathBuf,
    config: MatchConfig,
    mode: MatchMode,
}

impl GoldenMatcher {
    /// Compare against `golden_path` with the default configuration.
    pub fn new(golden_path: impl Into<PathBuf>) -> Self {
        Self {
            golden_path: golden_path.into(),
            config: MatchConfig::default(),
            mode: MatchMode::Compare,
        }
    }

    /// Like [`GoldenMatcher::new`], with the mode read from `GOLDENPIX_MODE`.
    pub fn from_env(golden_path: impl Into<PathBuf>) -> Self {
        Self::new(golden_path).with_mode(MatchMode::from_env())
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Golden file path.
    pub fn golden_path(&self) -> &Path {
        &self.golden_path
    }

    /// Current configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Match a candidate image against the golden file.
    ///
    /// A drifted candidate is not an error: the report says whether the
    /// match passed. Use [`GoldenMatcher::assert_matches`] to turn drift
    /// into [`MatchError::Mismatch`].
    ///
    /// # Errors
    ///
    /// - [`MatchError::GoldenNotFound`] when the golden file is missing in
    ///   compare mode and `skip_missing_golden` is off
    /// - [`MatchError::ImageLoad`] when the golden file cannot be decoded
    /// - [`MatchError::Transform`] when the candidate is too thin to scale
    pub fn matches(&self, candidate: &PixelBuffer) -> MatchResult<MatchReport> {
        let thumb = thumbnail(candidate, self.config.thumbnail_size)?;

        match self.mode {
            MatchMode::Display => {
                log::info!(
                    "display mode: not comparing against {}",
                    self.golden_path.display()
                );
                Ok(MatchReport::new(&self.golden_path, MatchOutcome::Skipped))
            }
            MatchMode::Generate => self.generate(&thumb),
            MatchMode::Compare => self.compare(&thumb),
        }
    }

    /// Capture a candidate from `source` and match it.
    pub fn matches_capture<C: Capture>(&self, source: &mut C) -> MatchResult<MatchReport> {
        let candidate = source
            .capture()
            .map_err(|e| MatchError::Capture(Box::new(e)))?;
        self.matches(&candidate)
    }

    /// Match a candidate and fail with [`MatchError::Mismatch`] on drift.
    pub fn assert_matches(&self, candidate: &PixelBuffer) -> MatchResult<MatchReport> {
        self.matches(candidate)?.into_result()
    }

    fn generate(&self, thumb: &PixelBuffer) -> MatchResult<MatchReport> {
        if let Some(parent) = self.golden_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MatchError::DirectoryCreate {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
        goldenpix_io::write_image(thumb, &self.golden_path, ImageFormat::Png).map_err(|e| {
            MatchError::ImageWrite {
                path: self.golden_path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        log::info!(
            "generated golden image {} ({}x{})",
            self.golden_path.display(),
            thumb.width(),
            thumb.height()
        );
        Ok(MatchReport::new(&self.golden_path, MatchOutcome::Generated))
    }

    fn compare(&self, thumb: &PixelBuffer) -> MatchResult<MatchReport> {
        if !self.golden_path.exists() {
            if self.config.skip_missing_golden {
                log::warn!(
                    "golden image {} not found, skipping comparison",
                    self.golden_path.display()
                );
                return Ok(MatchReport::new(&self.golden_path, MatchOutcome::Skipped));
            }
            return Err(MatchError::GoldenNotFound {
                path: self.golden_path.display().to_string(),
            });
        }

        let golden = load_golden(&self.golden_path, thumb.width(), thumb.height())?;
        let result = compare_buffers(
            thumb,
            &golden,
            self.config.max_difference_percent,
            self.config.want_diff_image,
        )?;
        log::debug!(
            "{}: {:.3}% difference",
            self.golden_path.display(),
            result.percent_difference()
        );

        let mut report = MatchReport::new(&self.golden_path, MatchOutcome::Compared(result));
        if !report.passed() {
            if let Some(dir) = &self.config.artifact_dir {
                let writer =
                    ArtifactWriter::new(dir.clone()).with_quality(self.config.artifact_quality);
                let diff = report.comparison().and_then(ComparisonResult::diff_image);
                let set = writer.write_failure_artifacts(&golden, thumb, diff);
                report.artifacts = set.written;
                report.artifact_errors = set.errors;
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_describe_skipped() {
        let report = MatchReport::new(Path::new("golden/a.png"), MatchOutcome::Skipped);
        assert!(report.passed());
        assert_eq!(
            report.describe(),
            "with golden image from path: golden/a.png. Comparison skipped"
        );
    }

    #[test]
    fn test_missing_golden_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let matcher = GoldenMatcher::new(dir.path().join("missing.png"));
        let err = matcher.matches(&fixtures::solid(10, 10, 0xff00_0000)).unwrap_err();
        assert!(matches!(err, MatchError::GoldenNotFound { .. }));
    }

    #[test]
    fn test_display_mode_skips() {
        let matcher = GoldenMatcher::new("/nonexistent/golden.png").with_mode(MatchMode::Display);
        let report = matcher.matches(&fixtures::solid(10, 10, 0xff00_0000)).unwrap();
        assert!(matches!(report.outcome(), MatchOutcome::Skipped));
    }
}
