use fox_backend::BackendError;
use fox_core::UpstreamError;
use thiserror::Error;

/// Errors raised while dispatching a request.
///
/// A response with a status outside the accepted set is *not* an error; it
/// is reported as [`Dispatch::Rejected`](crate::Dispatch::Rejected).
#[derive(Debug, Error)]
pub enum FoxError {
    /// `dispatch` was called before any base URL was configured.
    #[error("no base url configured; nothing to dispatch")]
    MalformedConfig,

    /// The transport failed. Not retried.
    #[error(transparent)]
    Transport(#[from] UpstreamError),

    /// The cache store failed, or a strict lookup missed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
