//! # fox
//!
//! A request-deduplicating HTTP cache for row-by-row data enrichment.
//!
//! Enrichment jobs look up the same identifiers again and again: across
//! reruns, while debugging, or because two rows share an ISBN. fox makes
//! each distinct request go out at most once. The first accepted response
//! is stored under a canonical key built from the base URL and the
//! non-private query parameters; every later dispatch of that key is
//! answered from the store, without the courtesy delay and without touching
//! the network.
//!
//! ```text
//! Enricher ─> Fox::configure ─> CacheKey
//!                 │
//!           Fox::dispatch ─> Backend::contains ─ hit ──> Cached
//!                 │                              miss
//!                 │          [delay] ─> Upstream::call ─> accepted? ─> Backend::write
//!                 └─> Fox::fetch ─> CachedResponse ─> Extract ─> Row
//! ```
//!
//! Storage lives in `fox-backend` (in-memory) and `fox-feoxdb` (on disk),
//! the HTTP transport in `fox-reqwest`, and YAML configuration in
//! `fox-configuration`.
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// The [`Fox`] dispatcher and its [`Dispatch`] outcome.
pub mod dispatcher;

/// First-match-wins row enrichment.
pub mod enrich;

/// Error types for dispatching.
///
/// Defines [`FoxError`] which covers:
/// - Dispatching before a base URL was configured
/// - Transport failures
/// - Backend failures
pub mod error;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, this module provides counters
/// for cache hits, misses and rejected responses, and a histogram of
/// upstream call duration.
pub mod metrics;

pub use dispatcher::{Dispatch, Fox};
pub use enrich::{
    Candidate, Column, EnrichReport, Enricher, Extract, Fields, Identifier, Row, RowOutcome,
};
pub use error::FoxError;

pub use fox_core::{
    AcceptedStatuses, BackendLabel, CacheKey, CachedResponse, Headers, OutboundRequest,
    Parameters, PrivateKeys, RequestConfig, RequestConfigUpdate, Upstream, UpstreamError,
};

/// Backend re-exports.
pub mod backend {
    pub use fox_backend::{Backend, BackendError, CacheBackend, MemoryBackend};
}

/// The `fox` prelude.
///
/// ```rust
/// use fox::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Candidate, Dispatch, Enricher, Extract, Fox, FoxError, RequestConfigUpdate, Row,
        Upstream,
    };
}
