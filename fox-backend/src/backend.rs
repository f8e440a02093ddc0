use std::sync::Arc;

use async_trait::async_trait;
use fox_core::{BackendLabel, CacheKey, CachedResponse};

use crate::BackendError;

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// A durable mapping from [`CacheKey`] to [`CachedResponse`].
///
/// Membership, read and write are independent operations; there is no
/// atomic get-or-insert. A single process is assumed to own the store for
/// the duration of a run.
#[async_trait]
pub trait Backend: Sync + Send {
    /// Reads the entry stored under `key`, if any.
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CachedResponse>>;

    /// Stores `value` under `key`, replacing nothing in practice since the
    /// dispatcher only writes on a miss.
    async fn write(&self, key: &CacheKey, value: CachedResponse) -> BackendResult<()>;

    /// Whether an entry exists under `key`.
    async fn contains(&self, key: &CacheKey) -> BackendResult<bool> {
        Ok(self.read(key).await?.is_some())
    }

    /// Identifies this backend in logs and metrics.
    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("backend")
    }
}

#[async_trait]
impl<T> Backend for Arc<T>
where
    T: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CachedResponse>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CachedResponse) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    async fn contains(&self, key: &CacheKey) -> BackendResult<bool> {
        (**self).contains(key).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}

#[async_trait]
impl Backend for Box<dyn Backend> {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CachedResponse>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CachedResponse) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    async fn contains(&self, key: &CacheKey) -> BackendResult<bool> {
        (**self).contains(key).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}

/// Strict accessors layered over [`Backend`].
#[async_trait]
pub trait CacheBackend: Backend {
    /// Reads the entry under `key`, failing with
    /// [`BackendError::KeyNotFound`] when it is absent.
    async fn get(&self, key: &CacheKey) -> BackendResult<CachedResponse> {
        self.read(key)
            .await?
            .ok_or_else(|| BackendError::KeyNotFound(key.clone()))
    }
}

impl<T> CacheBackend for T where T: Backend + ?Sized {}
