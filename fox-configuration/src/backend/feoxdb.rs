use std::sync::Arc;

use fox_backend::Backend as BackendTrait;
use serde::{Deserialize, Serialize};

use super::ValueSerialization;
use crate::error::ConfigError;

/// FeOxDB store settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FeOxDb {
    /// Store directory or database file. In-memory when absent.
    pub path: Option<String>,
    /// Value encoding; must match what the store was written with.
    #[serde(default)]
    pub format: ValueSerialization,
    /// Cap on the database file size in bytes.
    pub max_file_size: Option<u64>,
}

impl FeOxDb {
    /// Opens the store.
    #[cfg(feature = "feoxdb")]
    pub fn into_backend(self) -> Result<Arc<dyn BackendTrait>, ConfigError> {
        use fox_feoxdb::FeOxDbBackend;

        let mut builder = FeOxDbBackend::builder().value_format(self.format.to_serializer());

        if let Some(path) = self.path {
            builder = builder.path(path);
        }
        if let Some(bytes) = self.max_file_size {
            builder = builder.max_file_size(bytes);
        }

        let backend = builder
            .build()
            .map_err(|e| ConfigError::BackendNotAvailable(format!("FeOxDb: {}", e)))?;

        Ok(Arc::new(backend))
    }

    /// Opens the store.
    #[cfg(not(feature = "feoxdb"))]
    pub fn into_backend(self) -> Result<Arc<dyn BackendTrait>, ConfigError> {
        Err(ConfigError::BackendNotAvailable("FeOxDb".to_string()))
    }
}
