//! Error types for detpost.

use thiserror::Error;

/// Result alias for detpost operations.
pub type DetPostResult<T> = std::result::Result<T, DetPostError>;

/// Errors that can occur when configuring detectors or validating tensors.
///
/// The post-processing stages themselves never fail; every variant here is
/// raised at a validation boundary before any decoding starts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DetPostError {
    /// A scalar parameter is out of its valid range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The tensor layout is inconsistent (too few channels, no classes, overflow).
    #[error("invalid tensor layout: {reason}")]
    InvalidLayout { reason: &'static str },
    /// The flat tensor is shorter than `num_predictions * num_channels`.
    #[error("tensor too small: needed {needed} values, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The factory was asked for a detector tag it does not know.
    #[error("unknown detector kind: {tag:?}")]
    UnknownDetectorKind { tag: String },
    /// A label file could not be read.
    #[error("label file error: {reason}")]
    LabelIo { reason: String },
}
