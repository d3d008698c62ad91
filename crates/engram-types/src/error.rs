//! Shared error types for the engram memory substrate.

use thiserror::Error;

/// Top-level error type for the engram memory substrate.
///
/// No variant is fatal to the process: the substrate swallows these at its
/// boundary and reports failure as `false` or an empty result set.
#[derive(Error, Debug)]
pub enum EngramError {
    /// Credentials are missing/invalid or the backend is unreachable.
    /// Reads degrade to empty results, writes to failure.
    #[error("Backend connection unavailable: {0}")]
    ConnectionUnavailable(String),

    /// A backend insert/select operation failed.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A record failed to serialize or deserialize.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Alias for Result with EngramError.
pub type EngramResult<T> = Result<T, EngramError>;
