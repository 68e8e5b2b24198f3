//! Error types for DCT steganography operations.

use std::fmt;
use thiserror::Error;

/// Result type alias for all operations of this crate.
pub type Result<T> = std::result::Result<T, StegoError>;

#[derive(Error)]
pub enum StegoError {
    /// Represents a broken carrier image. For example a truncated file, dimensions
    /// not aligned to the block size or an unsupported channel count
    #[error("Image is invalid: {reason}")]
    InvalidImage { reason: String },

    /// Represents a transform input that is not exactly one 8x8 block
    #[error("Invalid block size: expected {expected} samples but got {actual}")]
    InvalidBlockSize { expected: usize, actual: usize },

    /// Represents a payload that does not fit into the carrier image
    #[error("Capacity exceeded: payload requires {required} bits but only {available} available")]
    PayloadTooLarge { required: usize, available: usize },

    /// Represents an image without any pixel data
    #[error("No pixel data allocated")]
    NullData,

    /// Represents a quantization step of zero
    #[error("Quantization step must be at least 1")]
    InvalidQuantizationStep,

    /// Represents an unveil of no secret data. For example when an image did not contain any secrets
    #[error("No secret data found")]
    NoSecretData,

    /// Represents an embedding that would not be recoverable from the written image
    #[error("Embedded data did not survive verification: {mismatched_bits} bits differ")]
    VerificationFailed { mismatched_bits: usize },

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl StegoError {
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        StegoError::InvalidImage {
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use Display for Debug so errors returned from main() stay readable
        write!(f, "{self}")
    }
}
