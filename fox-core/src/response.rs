//! Stored response value.

use serde::{Deserialize, Serialize};

/// The outcome of a live call, as kept in a cache.
///
/// Entries are written once, on the first accepted call for a key, and are
/// never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Final URL after redirects, including the query string.
    pub url: String,
    /// Response body decoded as text.
    pub body: String,
}

impl CachedResponse {
    /// Creates a response value.
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }
}
