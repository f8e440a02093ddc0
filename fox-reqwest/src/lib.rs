//! # fox-reqwest
//!
//! HTTP transport for [`fox`](https://docs.rs/fox) built on
//! [`reqwest`] and [`reqwest_middleware`].
//!
//! [`ReqwestUpstream`] implements [`fox_core::Upstream`]: it performs one GET
//! per cache miss and turns the reply into a
//! [`CachedResponse`](fox_core::CachedResponse). Retries are not part of the
//! dispatcher; callers that want them can hand in their own
//! [`ClientWithMiddleware`](reqwest_middleware::ClientWithMiddleware).
//!
//! ```no_run
//! use std::time::Duration;
//! use fox_reqwest::ReqwestUpstream;
//!
//! let upstream = ReqwestUpstream::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("fox/0.1")
//!     .build()?;
//! # Ok::<(), reqwest::Error>(())
//! ```

mod upstream;

pub use upstream::{DEFAULT_TIMEOUT, ReqwestUpstream, ReqwestUpstreamBuilder};
