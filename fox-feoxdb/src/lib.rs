//! File-backed store for the fox request cache.
//!
//! [`FeOxDbBackend`] keeps every accepted response on disk under its
//! canonical key, so a lookup made in one run is replayed in the next one
//! instead of being sent again.
//!
//! ```no_run
//! use fox_feoxdb::FeOxDbBackend;
//!
//! let backend = FeOxDbBackend::builder().path("demo_cache").build()?;
//! # Ok::<(), fox_feoxdb::FeOxDbError>(())
//! ```
#![warn(missing_docs)]

mod backend;
mod error;

pub use backend::{FeOxDbBackend, FeOxDbBackendBuilder};
pub use error::FeOxDbError;
