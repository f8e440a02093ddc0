//! # fox-configuration
//!
//! YAML configuration for fox runs.
//!
//! ```yaml
//! store:
//!   type: FeOxDb
//!   path: demo_cache
//!   format: Json
//! request:
//!   headers:
//!     User-Agent: "fox/0.1"
//!   private_keys: [key]
//!   accepted_statuses: [200]
//! courtesy_delay: 3s
//! timeout: 30s
//! ```
//!
//! Backends other than the in-memory one are behind cargo features
//! (`feoxdb`). Selecting a backend that is not compiled in fails with
//! [`ConfigError::BackendNotAvailable`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use fox_backend::Backend as BackendTrait;
use fox_core::RequestConfigUpdate;
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod error;
pub mod request;

pub use backend::Backend;
pub use error::ConfigError;
pub use request::RequestDefaults;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

/// Top-level configuration of a fox run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConfigFox {
    /// Response store. In-memory when omitted.
    #[serde(default)]
    pub store: Backend,
    /// Defaults for every request.
    #[serde(default)]
    pub request: RequestDefaults,
    /// Pause before each live call. Zero when omitted.
    #[serde(default, with = "humantime_serde")]
    pub courtesy_delay: Duration,
    /// Transport timeout per request.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ConfigFox {
    fn default() -> Self {
        Self {
            store: Backend::default(),
            request: RequestDefaults::default(),
            courtesy_delay: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ConfigFox {
    /// Parses a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// Reads and parses a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// The courtesy delay, `None` when zero.
    pub fn courtesy_delay(&self) -> Option<Duration> {
        Some(self.courtesy_delay).filter(|d| !d.is_zero())
    }

    /// Request defaults as a configuration update.
    pub fn request_defaults(&self) -> RequestConfigUpdate {
        self.request.clone().into_update()
    }

    /// Opens the configured store.
    pub fn into_backend(self) -> Result<Option<Arc<dyn BackendTrait>>, ConfigError> {
        self.store.into_backend()
    }
}
