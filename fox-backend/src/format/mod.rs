//! Value encodings for persisted responses.
//!
//! Backends that write bytes (as opposed to in-process maps) encode each
//! [`CachedResponse`] with a [`Format`]. [`JsonFormat`] is the default since
//! stored entries stay readable; [`BincodeFormat`] is more compact.

use std::fmt::Debug;

use fox_core::CachedResponse;
use thiserror::Error;

mod bincode;
mod json;

pub use bincode::BincodeFormat;
pub use json::JsonFormat;

/// Encoding or decoding failure.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The value could not be encoded.
    #[error(transparent)]
    Serialize(Box<dyn std::error::Error + Send + Sync>),

    /// The stored bytes could not be decoded.
    #[error(transparent)]
    Deserialize(Box<dyn std::error::Error + Send + Sync>),
}

/// Encodes and decodes stored responses.
pub trait Format: Debug + Send + Sync {
    /// Encodes `value` into bytes.
    fn serialize(&self, value: &CachedResponse) -> Result<Vec<u8>, FormatError>;

    /// Decodes bytes written by [`Format::serialize`].
    fn deserialize(&self, data: &[u8]) -> Result<CachedResponse, FormatError>;
}

impl<T> Format for std::sync::Arc<T>
where
    T: Format + ?Sized,
{
    fn serialize(&self, value: &CachedResponse) -> Result<Vec<u8>, FormatError> {
        (**self).serialize(value)
    }

    fn deserialize(&self, data: &[u8]) -> Result<CachedResponse, FormatError> {
        (**self).deserialize(data)
    }
}
