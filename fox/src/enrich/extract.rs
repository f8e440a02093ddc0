use indexmap::IndexMap;

use fox_core::CachedResponse;

/// Output column to value, in the order the columns should be written.
pub type Fields = IndexMap<String, String>;

/// Reads the wanted fields out of an accepted response body.
///
/// Returning `None` means the response carries nothing usable, and the next
/// candidate is tried.
pub trait Extract: Send + Sync {
    /// Extracts fields from `response`.
    fn extract(&self, response: &CachedResponse) -> Option<Fields>;
}

impl<F> Extract for F
where
    F: Fn(&CachedResponse) -> Option<Fields> + Send + Sync,
{
    fn extract(&self, response: &CachedResponse) -> Option<Fields> {
        self(response)
    }
}
