//! Canonical cache keys.
//!
//! A [`CacheKey`] is the identity of an outbound request for caching
//! purposes. It is derived from the request base and its parameters only;
//! headers never take part, and parameters named in the private set are
//! dropped before rendering.
//!
//! ## Format
//!
//! `{base}{name1}-{value1}_{name2}-{value2}...`
//!
//! - Parameter names are sorted lexicographically (byte order).
//! - The rendered pairs are appended to the base with no separator.
//! - With no parameters at all the key is the base verbatim.
//!
//! Stores written by earlier runs are addressed by this exact string, so the
//! format must never change.
//!
//! ```
//! use fox_core::{CacheKey, Parameters, PrivateKeys};
//!
//! let mut params = Parameters::new();
//! params.insert("summary".into(), "true".into());
//! params.insert("isbn".into(), "123".into());
//!
//! let key = CacheKey::build(Some("http://svc/x"), &params, &PrivateKeys::new()).unwrap();
//! assert_eq!(key.as_str(), "http://svc/xisbn-123_summary-true");
//! ```
//!
//! Values containing `-` or `_` can make two different parameter sets render
//! to the same key. That ambiguity is part of the persisted format and is
//! kept as is.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::request::{Parameters, PrivateKeys};

const PAIR_SEPARATOR: char = '-';
const PART_SEPARATOR: char = '_';

/// The canonical identity of a request.
///
/// Cloning is cheap: the string is shared behind an [`Arc`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    inner: Arc<str>,
}

impl CacheKey {
    /// Builds the canonical key for `base` and `parameters`.
    ///
    /// Returns `None` when there is no base, since no request is
    /// representable without one.
    pub fn build(
        base: Option<&str>,
        parameters: &Parameters,
        private_keys: &PrivateKeys,
    ) -> Option<CacheKey> {
        let base = base?;
        if parameters.is_empty() {
            return Some(CacheKey::from(base));
        }

        let mut names: Vec<&String> = parameters.keys().collect();
        names.sort_unstable();

        let mut key = String::from(base);
        let mut first = true;
        for name in names {
            if private_keys.contains(name.as_str()) {
                continue;
            }
            if !first {
                key.push(PART_SEPARATOR);
            }
            first = false;
            key.push_str(name);
            key.push(PAIR_SEPARATOR);
            key.push_str(&parameters[name]);
        }

        Some(CacheKey::from(key))
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the key as raw bytes, the form persisted by storage backends.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheKey").field(&self.as_str()).finish()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        CacheKey {
            inner: Arc::from(value),
        }
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        CacheKey {
            inner: Arc::from(value),
        }
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl Serialize for CacheKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for CacheKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(CacheKey::from)
    }
}
