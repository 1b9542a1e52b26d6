//! Error types for raster analysis and inspection pipelines.

use thiserror::Error;

/// Errors raised when an operation's preconditions are violated.
///
/// Every operation is total over well-formed, equally sized buffers; these
/// variants only describe caller mistakes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Pixel buffer holds {actual} samples, expected {expected} ({width}x{height})")]
    BufferSizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Raster is empty ({width}x{height})")]
    EmptyRaster { width: usize, height: usize },

    #[error("Dimension mismatch for {what}: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid kernel size {width}x{height}: both sides must be at least 1")]
    InvalidKernel { width: usize, height: usize },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_mismatch_message() {
        let err = Error::BufferSizeMismatch {
            width: 4,
            height: 3,
            expected: 12,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "Pixel buffer holds 10 samples, expected 12 (4x3)"
        );
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch {
            what: "label map",
            expected: (5, 5),
            actual: (4, 5),
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch for label map: expected (5, 5), got (4, 5)"
        );
    }

    #[test]
    fn test_invalid_kernel_message() {
        let err = Error::InvalidKernel {
            width: 0,
            height: 3,
        };
        assert!(err.to_string().contains("0x3"));
    }
}
