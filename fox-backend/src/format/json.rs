use fox_core::CachedResponse;

use super::{Format, FormatError};

/// JSON format (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn serialize(&self, value: &CachedResponse) -> Result<Vec<u8>, FormatError> {
        serde_json::to_vec(value).map_err(|e| FormatError::Serialize(Box::new(e)))
    }

    fn deserialize(&self, data: &[u8]) -> Result<CachedResponse, FormatError> {
        serde_json::from_slice(data).map_err(|e| FormatError::Deserialize(Box::new(e)))
    }
}
