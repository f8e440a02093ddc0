//! Process-lifetime backend.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use fox_core::{BackendLabel, CacheKey, CachedResponse};

use crate::{Backend, BackendResult};

/// In-memory backend keyed by the canonical key string.
///
/// Entries live as long as the backend (or any of its clones). Nothing is
/// ever evicted. Use it in tests or for runs that must not leave a store
/// behind on disk.
///
/// Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    entries: Arc<DashMap<CacheKey, CachedResponse>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CachedResponse>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn write(&self, key: &CacheKey, value: CachedResponse) -> BackendResult<()> {
        self.entries.insert(key.clone(), value);
        Ok(())
    }

    async fn contains(&self, key: &CacheKey) -> BackendResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendError, CacheBackend};

    #[tokio::test]
    async fn test_write_then_contains_and_get() {
        let backend = MemoryBackend::new();
        let key = CacheKey::from("http://svc/xisbn-1");

        assert!(!backend.contains(&key).await.unwrap());
        backend
            .write(&key, CachedResponse::new(200, "http://svc/x?isbn=1", "ok"))
            .await
            .unwrap();

        assert!(backend.contains(&key).await.unwrap());
        assert_eq!(backend.get(&key).await.unwrap().body, "ok");
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_key_not_found() {
        let backend = MemoryBackend::new();
        let key = CacheKey::from("missing");

        match backend.get(&key).await {
            Err(BackendError::KeyNotFound(missing)) => assert_eq!(missing, key),
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        let key = CacheKey::from("shared");

        clone
            .write(&key, CachedResponse::new(200, "shared", ""))
            .await
            .unwrap();
        assert!(backend.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_through_trait_object() {
        let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
        let key = CacheKey::from("dyn");

        backend
            .write(&key, CachedResponse::new(200, "dyn", "body"))
            .await
            .unwrap();
        assert_eq!(backend.get(&key).await.unwrap().body, "body");
        assert_eq!(backend.label().as_str(), "memory");
    }
}
