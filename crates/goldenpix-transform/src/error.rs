//! Error types for goldenpix-transform

use thiserror::Error;

/// Errors that can occur while scaling
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] goldenpix_core::Error),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Scaling produced a zero-sized image
    #[error("degenerate thumbnail: {width}x{height}")]
    Shape { width: u32, height: u32 },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
