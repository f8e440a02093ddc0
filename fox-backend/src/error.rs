//! Error types for backend operations.

use crate::format::FormatError;
use fox_core::CacheKey;
use thiserror::Error;

/// Error type for backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal backend error, state or storage engine failure.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),

    /// Serialization or deserialization error.
    #[error(transparent)]
    FormatError(#[from] FormatError),

    /// A strict lookup asked for a key that was never stored.
    ///
    /// Callers are expected to check membership first, so this indicates a
    /// logic error rather than a cache miss.
    #[error("cache key not found: {0}")]
    KeyNotFound(CacheKey),
}
