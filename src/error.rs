//! Error types for golden generation and verification.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
///
/// These are the fatal errors: a failed file load or a malformed input
/// aborts the run before any comparison starts. Numeric mismatches found
/// during comparison are not errors in this sense; they are accumulated as
/// [`crate::verify::ErrorRecord`] values and inspected at report time.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not recognized
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// RTL trace text could not be parsed
    #[error("Failed to parse RTL trace: {0}")]
    TraceParse(String),

    /// Tensor shapes are inconsistent
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
