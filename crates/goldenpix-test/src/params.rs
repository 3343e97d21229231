//! Regression test parameters and operations

use crate::config::MatchMode;
use crate::error::{MatchError, MatchResult};
use crate::{golden_dir, regout_dir};
use goldenpix_compare::compare_buffers;
use goldenpix_core::{ImageFormat, PixelBuffer};
use std::fs;
use std::path::{Path, PathBuf};

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, current index,
/// mode, and success status. Each check increments the index, so failures
/// can be traced back to the numbered step that produced them.
pub struct RegParams {
    /// Name of the test (e.g., "compare")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: MatchMode,
    golden_dir: PathBuf,
    regout_dir: PathBuf,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `GOLDENPIX_MODE` environment variable and the
    /// golden/output directories from the workspace `tests/` directory.
    pub fn new(test_name: &str) -> Self {
        Self::with_dirs(
            test_name,
            golden_dir(),
            regout_dir(),
            MatchMode::from_env(),
        )
    }

    /// Create regression test parameters with explicit directories and mode
    pub fn with_dirs(
        test_name: &str,
        golden_dir: impl Into<PathBuf>,
        regout_dir: impl Into<PathBuf>,
        mode: MatchMode,
    ) -> Self {
        let golden_dir = golden_dir.into();
        let regout_dir = regout_dir.into();

        // Missing directories only matter to file checks, which report them
        let _ = fs::create_dir_all(&golden_dir);
        let _ = fs::create_dir_all(&regout_dir);

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            golden_dir,
            regout_dir,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == MatchMode::Display
    }

    fn fail(&mut self, msg: String) {
        log::error!("{}", msg);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_pix(&mut self, pix1: &PixelBuffer, pix2: &PixelBuffer) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix2.width(),
                pix2.height()
            ));
            return false;
        }

        let mismatch = pix1
            .data()
            .iter()
            .zip(pix2.data())
            .position(|(a, b)| a != b);
        if let Some(i) = mismatch {
            let (x, y) = (i as u32 % pix1.width(), i as u32 / pix1.width());
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name, self.index, x, y
            ));
            return false;
        }

        true
    }

    /// Compare two images with the similarity engine
    ///
    /// # Arguments
    ///
    /// * `candidate` - Image under test
    /// * `reference` - Expected image
    /// * `max_percent` - Largest difference percentage that still passes
    pub fn compare_similar(
        &mut self,
        candidate: &PixelBuffer,
        reference: &PixelBuffer,
        max_percent: f64,
    ) -> bool {
        self.index += 1;
        let message = match compare_buffers(candidate, reference, max_percent, false) {
            Ok(result) if result.passed() => return true,
            Ok(result) => result.message().unwrap_or_default(),
            Err(e) => e.to_string(),
        };
        self.fail(format!(
            "Failure in {}_reg: similarity comparison for index {} - {}",
            self.test_name, self.index, message
        ));
        false
    }

    /// Write an image to the output directory and check it against its
    /// golden counterpart
    ///
    /// In generate mode, the file becomes the golden file. In compare mode,
    /// both files are decoded and compared pixel by pixel (lossy formats
    /// with the default similarity threshold). In display mode, only the
    /// output file is written.
    pub fn write_pix_and_check(&mut self, pix: &PixelBuffer, format: ImageFormat) -> MatchResult<()> {
        self.index += 1;

        let ext = format.extension();
        let local_path = self
            .regout_dir
            .join(format!("{}.{:02}.{}", self.test_name, self.index, ext));
        goldenpix_io::write_image(pix, &local_path, format).map_err(|e| {
            MatchError::ImageWrite {
                path: local_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let golden_path = self
            .golden_dir
            .join(format!("{}_golden.{:02}.{}", self.test_name, self.index, ext));
        self.check_file(&local_path, &golden_path, format)
    }

    fn check_file(&mut self, local_path: &Path, golden_path: &Path, format: ImageFormat) -> MatchResult<()> {
        match self.mode {
            MatchMode::Generate => {
                fs::copy(local_path, golden_path)?;
                eprintln!("Generated: {}", golden_path.display());
            }
            MatchMode::Compare => {
                if !golden_path.exists() {
                    self.fail(format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name,
                        golden_path.display()
                    ));
                    return Ok(());
                }
                if fs::read(local_path)? == fs::read(golden_path)? {
                    return Ok(());
                }

                let same = match (
                    goldenpix_io::read_image(local_path),
                    goldenpix_io::read_image(golden_path),
                ) {
                    (Ok(local), Ok(golden)) if format == ImageFormat::Jpeg => {
                        compare_buffers(
                            &local,
                            &golden,
                            goldenpix_compare::DEFAULT_MAX_DIFFERENCE_PERCENT,
                            false,
                        )?
                        .passed()
                    }
                    (Ok(local), Ok(golden)) => local == golden,
                    _ => false,
                };
                if !same {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name,
                        self.index,
                        local_path.display(),
                        golden_path.display()
                    ));
                }
            }
            MatchMode::Display => {}
        }
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
