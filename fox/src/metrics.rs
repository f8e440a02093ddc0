//! Metrics declaration and initialization.

use std::time::Duration;

use fox_core::BackendLabel;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of dispatches served from a cache.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "fox_cache_hit_total",
            "Total number of dispatches answered by the cache."
        );
        "fox_cache_hit_total"
    };
    /// Track number of dispatches that required a live call.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "fox_cache_miss_total",
            "Total number of dispatches that went upstream."
        );
        "fox_cache_miss_total"
    };
    /// Track number of live responses outside the accepted status set.
    pub static ref RESPONSE_REJECTED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "fox_response_rejected_total",
            "Total number of live responses with a status outside the accepted set."
        );
        "fox_response_rejected_total"
    };
    /// Histogram of upstream call duration, courtesy delay excluded.
    pub static ref UPSTREAM_DURATION: &'static str = {
        metrics::describe_histogram!(
            "fox_upstream_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of live upstream calls in seconds."
        );
        "fox_upstream_duration_seconds"
    };
}

/// Record a cache hit on `backend`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_hit(backend: &BackendLabel) {
    metrics::counter!(*CACHE_HIT_COUNTER, "backend" => backend.to_string()).increment(1);
}

/// Record a cache miss; `backend` is `None` when no cache is attached.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_miss(backend: Option<&BackendLabel>) {
    let backend = backend.map_or_else(|| "none".to_string(), ToString::to_string);
    metrics::counter!(*CACHE_MISS_COUNTER, "backend" => backend).increment(1);
}

/// Record a live response that was not accepted.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_rejected(status: u16) {
    metrics::counter!(*RESPONSE_REJECTED_COUNTER, "status" => status.to_string()).increment(1);
}

/// Record the duration of a live call.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_upstream(duration: Duration) {
    metrics::histogram!(*UPSTREAM_DURATION).record(duration.as_secs_f64());
}

/// No-op versions when the metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
#[allow(missing_docs)]
pub fn record_hit(_backend: &BackendLabel) {}

#[cfg(not(feature = "metrics"))]
#[inline]
#[allow(missing_docs)]
pub fn record_miss(_backend: Option<&BackendLabel>) {}

#[cfg(not(feature = "metrics"))]
#[inline]
#[allow(missing_docs)]
pub fn record_rejected(_status: u16) {}

#[cfg(not(feature = "metrics"))]
#[inline]
#[allow(missing_docs)]
pub fn record_upstream(_duration: Duration) {}
