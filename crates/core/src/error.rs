//! Error types for lineweld segment processing.

use std::fmt;

use thiserror::Error;

/// Why a raw segment could not be annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Both endpoints coincide, so the orientation is undefined.
    ZeroLength,
    /// At least one coordinate is NaN or infinite.
    NonFinite,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::ZeroLength => f.write_str("zero-length segment"),
            InvalidReason::NonFinite => f.write_str("non-finite coordinate"),
        }
    }
}

/// Primary error type for segment consolidation and grouping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    #[error("invalid segment at index {index}: {reason}")]
    InvalidSegment { index: usize, reason: InvalidReason },

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Convenience Result type alias for SegmentError.
pub type Result<T> = std::result::Result<T, SegmentError>;
