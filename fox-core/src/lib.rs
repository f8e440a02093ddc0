#![warn(missing_docs)]
//! # fox-core
//!
//! Core types for the fox request cache.
//!
//! fox sits between an enrichment job and the remote services it queries.
//! Every outbound GET is identified by a canonical [`CacheKey`]; a request is
//! only sent when that key has never been stored before. This crate holds the
//! pieces every other fox crate agrees on:
//!
//! - **Identify** a request ([`CacheKey`])
//! - **Describe** a request and change it piecewise ([`RequestConfig`], [`RequestConfigUpdate`])
//! - **Classify** responses ([`AcceptedStatuses`])
//! - **Store** responses ([`CachedResponse`])
//! - **Send** requests ([`Upstream`])

pub mod key;
pub mod label;
pub mod request;
pub mod response;
pub mod status;
pub mod upstream;

pub use key::CacheKey;
pub use label::BackendLabel;
pub use request::{Headers, Parameters, PrivateKeys, RequestConfig, RequestConfigUpdate};
pub use response::CachedResponse;
pub use status::AcceptedStatuses;
pub use upstream::{OutboundRequest, Upstream, UpstreamError};
