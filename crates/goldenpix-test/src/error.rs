//! Error types for the golden matcher and test framework

use goldenpix_compare::CompareError;
use goldenpix_io::IoError;
use goldenpix_transform::TransformError;
use thiserror::Error;

/// Errors that can occur while matching against a golden image
#[derive(Debug, Error)]
pub enum MatchError {
    /// Failed to load an image
    #[error("failed to load image '{path}': {message}")]
    ImageLoad { path: String, message: String },

    /// Failed to write an image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Failed to write a failure artifact
    #[error("failed to write artifact '{path}': {message}")]
    ArtifactWrite { path: String, message: String },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {message}")]
    DirectoryCreate { path: String, message: String },

    /// Golden file not found
    #[error("golden file not found: {path}")]
    GoldenNotFound { path: String },

    /// The capture source failed to produce an image
    #[error("capture failed: {0}")]
    Capture(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The candidate drifted from the golden image
    #[error("with golden image from path: {path}. {message}")]
    Mismatch { path: String, message: String },

    /// Decoding or encoding error
    #[error("image error: {0}")]
    Image(#[from] IoError),

    /// Thumbnail error
    #[error("thumbnail error: {0}")]
    Transform(#[from] TransformError),

    /// Comparison error
    #[error("comparison error: {0}")]
    Compare(#[from] CompareError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for matcher operations
pub type MatchResult<T> = Result<T, MatchError>;
