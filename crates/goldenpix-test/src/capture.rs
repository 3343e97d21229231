//! Screenshot sources
//!
//! Capturing a live screen is platform specific. The matcher only needs
//! something that produces a [`PixelBuffer`] on demand.

use goldenpix_core::PixelBuffer;
use goldenpix_io::IoError;
use std::path::PathBuf;

/// Produces the candidate image for a golden match
///
/// Any `FnMut() -> Result<PixelBuffer, E>` closure is a capture source.
///
/// # Examples
///
/// ```
/// use goldenpix_core::PixelBuffer;
/// use goldenpix_test::Capture;
///
/// let mut source = || PixelBuffer::new_filled(8, 8, 0xff00_0000);
/// let shot = source.capture().unwrap();
/// assert_eq!(shot.width(), 8);
/// ```
pub trait Capture {
    /// Error reported when capturing fails
    type Error: std::error::Error + Send + Sync + 'static;

    /// Capture one image.
    fn capture(&mut self) -> Result<PixelBuffer, Self::Error>;
}

impl<F, E> Capture for F
where
    F: FnMut() -> Result<PixelBuffer, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn capture(&mut self) -> Result<PixelBuffer, E> {
        self()
    }
}

/// Capture source that decodes an image file written by another tool
#[derive(Debug, Clone)]
pub struct FileCapture {
    path: PathBuf,
}

impl FileCapture {
    /// Read captures from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Capture for FileCapture {
    type Error = IoError;

    fn capture(&mut self) -> Result<PixelBuffer, IoError> {
        goldenpix_io::read_image(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_capture() {
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            PixelBuffer::new(2, 3)
        };
        assert_eq!(source.capture().unwrap().dimensions(), (2, 3));
        assert_eq!(source.capture().unwrap().dimensions(), (2, 3));
        drop(source);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_file_capture_missing() {
        let mut source = FileCapture::new("/nonexistent/goldenpix/shot.png");
        assert!(matches!(source.capture(), Err(IoError::Io(_))));
    }
}
