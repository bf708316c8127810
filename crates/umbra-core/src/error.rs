//! Error taxonomy for umbra operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the analysis and normalization pipelines and their
/// decode/encode collaborators.
#[derive(Debug, Error)]
pub enum UmbraError {
    /// A parameter is outside its documented domain. Raised before any
    /// processing happens.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Sample buffer length does not match the declared dimensions
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// The decode collaborator could not produce a buffer
    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// The encode collaborator could not persist a buffer
    #[error("failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    /// Configuration could not be used
    #[error("configuration error: {0}")]
    Config(String),
}

impl UmbraError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, UmbraError>;
