//! Error types for the core generation crate.

use atelier_protocol::DesignId;
use thiserror::Error;

/// Errors returned by generation and store operations.
#[derive(Debug, Error)]
pub enum AtelierCoreError {
    /// The external model errored, timed out, or returned unusable output.
    /// Deliberately undistinguished; callers surface a uniform retry signal.
    #[error("generation failed: {0}")]
    Generation(String),
    /// Referenced design id is absent from history.
    #[error("unknown design: {0}")]
    DesignNotFound(DesignId),
    /// Malformed inbound request, rejected before touching the model.
    #[error("invalid request: {0}")]
    Validation(String),
}
