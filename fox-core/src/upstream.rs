//! Transport seam used on cache misses.

use std::future::Future;

use thiserror::Error;

use crate::request::{Headers, Parameters};
use crate::response::CachedResponse;

/// Everything a transport needs to perform one GET.
///
/// Unlike the cache key, parameters here include private ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Endpoint URL.
    pub base: String,
    /// Query parameters, private ones included.
    pub parameters: Parameters,
    /// Request headers.
    pub headers: Headers,
}

/// Transport level failure: timeouts, DNS errors, connection resets.
///
/// Never retried by the dispatcher.
#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct UpstreamError {
    url: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl UpstreamError {
    /// Wraps a transport error raised while calling `url`.
    pub fn new(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }

    /// The URL that could not be reached.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Trait for sending outbound requests.
///
/// The dispatcher only ever calls this on a cache miss.
///
/// # Examples
///
/// ```rust
/// use fox_core::{CachedResponse, OutboundRequest, Upstream, UpstreamError};
/// use std::future::Ready;
///
/// struct Fixed(CachedResponse);
///
/// impl Upstream for Fixed {
///     type Future = Ready<Result<CachedResponse, UpstreamError>>;
///
///     fn call(&mut self, _req: OutboundRequest) -> Self::Future {
///         std::future::ready(Ok(self.0.clone()))
///     }
/// }
/// ```
pub trait Upstream {
    /// The future that resolves to the response
    type Future: Future<Output = Result<CachedResponse, UpstreamError>> + Send;

    /// Send `req` and read the whole response body.
    fn call(&mut self, req: OutboundRequest) -> Self::Future;
}
