//! Error types for despill operations.

use thiserror::Error;

/// Error type for despill operations.
///
/// The per-pixel math never fails. Errors come from malformed source
/// strips and from configurations that cannot be repaired.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Strip or channel problem.
    #[error(transparent)]
    Core(#[from] despill_core::Error),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for despill operations.
pub type OpsResult<T> = Result<T, OpsError>;
