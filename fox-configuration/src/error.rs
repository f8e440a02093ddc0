use thiserror::Error;

/// Errors raised while loading a configuration or opening what it describes.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The requested backend is not compiled in or failed to open.
    #[error("backend not available: {0}")]
    BackendNotAvailable(String),
}
