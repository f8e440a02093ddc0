use ::bincode::config::standard;
use ::bincode::serde::{decode_from_slice, encode_to_vec};
use fox_core::CachedResponse;

use super::{Format, FormatError};

/// Bincode format
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeFormat;

impl Format for BincodeFormat {
    fn serialize(&self, value: &CachedResponse) -> Result<Vec<u8>, FormatError> {
        encode_to_vec(value, standard()).map_err(|e| FormatError::Serialize(Box::new(e)))
    }

    fn deserialize(&self, data: &[u8]) -> Result<CachedResponse, FormatError> {
        let (value, _): (CachedResponse, _) = decode_from_slice(data, standard())
            .map_err(|e| FormatError::Deserialize(Box::new(e)))?;
        Ok(value)
    }
}
