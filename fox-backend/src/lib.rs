//! Storage backends for the fox request cache.
//!
//! A backend is the durable half of request deduplication: the dispatcher
//! asks it whether a canonical key has been seen, and writes accepted
//! responses into it. Implement [`Backend`] to plug in a new store;
//! [`CacheBackend`] comes for free.
mod backend;
mod error;
pub mod format;
mod memory;

pub use backend::{Backend, BackendResult, CacheBackend};
pub use error::BackendError;
pub use format::{BincodeFormat, Format, FormatError, JsonFormat};
pub use memory::MemoryBackend;
