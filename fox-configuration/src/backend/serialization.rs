use std::sync::Arc;

use fox_backend::format::{BincodeFormat, Format, JsonFormat};
use serde::{Deserialize, Serialize};

/// Encoding of stored values.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum ValueSerialization {
    /// Human-readable, the default.
    #[default]
    Json,
    /// Compact binary.
    Bincode,
}

impl ValueSerialization {
    /// The matching [`Format`].
    pub fn to_serializer(&self) -> Arc<dyn Format> {
        match self {
            ValueSerialization::Json => Arc::new(JsonFormat),
            ValueSerialization::Bincode => Arc::new(BincodeFormat),
        }
    }
}
