//! Matcher configuration

use goldenpix_compare::DEFAULT_MAX_DIFFERENCE_PERCENT;
use goldenpix_transform::DEFAULT_THUMBNAIL_SIZE;
use std::path::PathBuf;

/// Environment variable selecting the [`MatchMode`].
pub const MODE_ENV_VAR: &str = "GOLDENPIX_MODE";

/// JPEG quality of failure artifacts.
pub const ARTIFACT_JPEG_QUALITY: u8 = 85;

/// What to do with golden images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Write the candidate as the new golden file
    Generate,
    /// Display mode - run without comparison
    Display,
}

impl MatchMode {
    /// Read the mode from `GOLDENPIX_MODE`
    ///
    /// Accepts "compare", "generate" or "display" in any case; anything else
    /// (including an unset variable) selects `Compare`.
    pub fn from_env() -> Self {
        Self::parse(&std::env::var(MODE_ENV_VAR).unwrap_or_default())
    }

    /// Parse a mode name.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Settings for one golden match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Longest side of the compared thumbnails
    pub thumbnail_size: u32,
    /// Largest difference percentage that still passes
    pub max_difference_percent: f64,
    /// Render the diff image even when the match passes
    pub want_diff_image: bool,
    /// Pass instead of failing when the golden file is missing
    pub skip_missing_golden: bool,
    /// Where failure artifacts go; `None` disables them
    pub artifact_dir: Option<PathBuf>,
    /// JPEG quality of failure artifacts
    pub artifact_quality: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            max_difference_percent: DEFAULT_MAX_DIFFERENCE_PERCENT,
            want_diff_image: false,
            skip_missing_golden: false,
            artifact_dir: None,
            artifact_quality: ARTIFACT_JPEG_QUALITY,
        }
    }
}

impl MatchConfig {
    /// Set the thumbnail size.
    pub fn with_thumbnail_size(mut self, size: u32) -> Self {
        self.thumbnail_size = size;
        self
    }

    /// Set the allowed difference.
    pub fn with_max_difference_percent(mut self, percent: f64) -> Self {
        self.max_difference_percent = percent;
        self
    }

    /// Always render the diff image.
    pub fn with_diff_image(mut self, want: bool) -> Self {
        self.want_diff_image = want;
        self
    }

    /// Pass when the golden file is missing.
    pub fn with_skip_missing_golden(mut self, skip: bool) -> Self {
        self.skip_missing_golden = skip;
        self
    }

    /// Write failure artifacts into `dir`.
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(MatchMode::parse("generate"), MatchMode::Generate);
        assert_eq!(MatchMode::parse(" Display "), MatchMode::Display);
        assert_eq!(MatchMode::parse("COMPARE"), MatchMode::Compare);
        assert_eq!(MatchMode::parse(""), MatchMode::Compare);
        assert_eq!(MatchMode::parse("bogus"), MatchMode::Compare);
    }

    #[test]
    fn test_mode_from_env() {
        // The variable may be set by the caller; any value maps to a mode
        let mode = MatchMode::from_env();
        assert!(matches!(
            mode,
            MatchMode::Compare | MatchMode::Generate | MatchMode::Display
        ));
    }

    #[test]
    fn test_config_default() {
        let config = MatchConfig::default();
        assert_eq!(config.thumbnail_size, 500);
        assert_eq!(config.max_difference_percent, 0.7);
        assert!(!config.want_diff_image);
        assert!(!config.skip_missing_golden);
        assert!(config.artifact_dir.is_none());
        assert_eq!(config.artifact_quality, 85);
    }
}
