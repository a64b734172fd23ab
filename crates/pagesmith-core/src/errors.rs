//! Error types for pagesmith.
//!
//! Parsing, markup generation and post-processing are best-effort and never
//! fail; the errors here cover input decoding, lock editing and the
//! prompt-driven generation round trip.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum PagesmithError {
    #[error(transparent)]
    Design(#[from] DesignError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors decoding a design export.
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("Design export is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors while editing locks in a rendered document.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("No element matches '{marker}'")]
    UnknownTarget { marker: String },

    #[error("Locked region list is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors in prompt-driven generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation not permitted: {reason}")]
    Denied { reason: String },

    #[error("Generative backend failed: {message}")]
    Backend { message: String },

    #[error("Generative backend returned an empty response")]
    EmptyResponse,

    #[error("Asset store failed: {message}")]
    Assets { message: String },
}

impl GenerationError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Denied { .. })
    }
}
