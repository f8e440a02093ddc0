//! Store selection.

use std::sync::Arc;

use fox_backend::{Backend as BackendTrait, MemoryBackend};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

mod feoxdb;
mod serialization;

pub use feoxdb::FeOxDb;
pub use serialization::ValueSerialization;

/// Where responses are kept between dispatches.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "type")]
pub enum Backend {
    /// On-disk FeOxDB store; survives restarts.
    FeOxDb(FeOxDb),
    /// Process-lifetime map.
    #[default]
    Memory,
    /// No cache; every dispatch goes upstream.
    Disabled,
}

impl Backend {
    /// Opens the configured store. `Disabled` yields `None`.
    pub fn into_backend(self) -> Result<Option<Arc<dyn BackendTrait>>, ConfigError> {
        match self {
            Backend::FeOxDb(config) => config.into_backend().map(Some),
            Backend::Memory => Ok(Some(Arc::new(MemoryBackend::new()))),
            Backend::Disabled => Ok(None),
        }
    }
}
