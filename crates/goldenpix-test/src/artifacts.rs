//! Failure artifact persistence
//!
//! When a match fails, the two thumbnails and the diff image are written as
//! JPEG files so that the drift can be inspected after the test run.

use crate::config::ARTIFACT_JPEG_QUALITY;
use crate::error::{MatchError, MatchResult};
use goldenpix_core::PixelBuffer;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Golden thumbnail artifact name.
pub const GOLDEN_THUMBNAIL_NAME: &str = "goldenThumbnail.jpg";

/// Candidate thumbnail artifact name.
pub const SCREEN_THUMBNAIL_NAME: &str = "screenThumbnail.jpg";

/// Diff image artifact name.
pub const DELTA_NAME: &str = "delta.jpg";

/// Writes JPEG artifacts into one directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
    quality: u8,
}

/// Paths written and errors hit while saving a set of artifacts
#[derive(Debug, Default, Clone)]
pub struct ArtifactSet {
    /// Files that were written
    pub written: Vec<PathBuf>,
    /// One message per file that could not be written
    pub errors: Vec<String>,
}

impl ArtifactWriter {
    /// Write into `dir` at the default artifact quality.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quality: ARTIFACT_JPEG_QUALITY,
        }
    }

    /// Override the JPEG quality (1-100).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one image as `dir/name`.
    pub fn write(&self, name: &str, pix: &PixelBuffer) -> MatchResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| MatchError::DirectoryCreate {
            path: self.dir.display().to_string(),
            message: e.to_string(),
        })?;

        let path = self.dir.join(name);
        let artifact_error = |message: String| MatchError::ArtifactWrite {
            path: path.display().to_string(),
            message,
        };

        let file = fs::File::create(&path).map_err(|e| artifact_error(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        goldenpix_io::jpeg::write_jpeg(pix, &mut writer, self.quality)
            .map_err(|e| artifact_error(e.to_string()))?;
        writer.flush().map_err(|e| artifact_error(e.to_string()))?;

        log::info!("wrote artifact {}", path.display());
        Ok(path)
    }

    /// Write the golden thumbnail, the candidate thumbnail and the diff.
    ///
    /// Every file is attempted; failures are logged and collected instead of
    /// aborting the remaining writes.
    pub fn write_failure_artifacts(
        &self,
        golden: &PixelBuffer,
        candidate: &PixelBuffer,
        diff: Option<&PixelBuffer>,
    ) -> ArtifactSet {
        let mut set = ArtifactSet::default();
        let items = [
            (GOLDEN_THUMBNAIL_NAME, Some(golden)),
            (SCREEN_THUMBNAIL_NAME, Some(candidate)),
            (DELTA_NAME, diff),
        ];
        for (name, pix) in items {
            let Some(pix) = pix else { continue };
            match self.write(name, pix) {
                Ok(path) => set.written.push(path),
                Err(e) => {
                    log::warn!("{}", e);
                    set.errors.push(e.to_string());
                }
            }
        }
        set
    }
}
