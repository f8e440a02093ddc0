use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use feoxdb::{FeoxError, FeoxStore};
use fox_backend::{Backend, BackendError, BackendResult, Format, JsonFormat};
use fox_core::{BackendLabel, CacheKey, CachedResponse};

use crate::FeOxDbError;

const DB_FILE_NAME: &str = "cache.db";

/// Disk-based cache backend using FeOxDB.
///
/// Keys are stored as the UTF-8 bytes of the canonical key string, so a
/// store can be inspected or shared by anything that builds keys the same
/// way. Values are encoded with the configured [`Format`].
///
/// ```no_run
/// use fox_feoxdb::FeOxDbBackend;
///
/// // Persistent store inside ./demo_cache (created if missing)
/// let backend = FeOxDbBackend::builder()
///     .path("demo_cache")
///     .build()?;
///
/// // With resource limits
/// let backend = FeOxDbBackend::builder()
///     .path("/var/cache/enrich/cache.db")
///     .max_file_size(1024 * 1024 * 1024)  // 1 GB
///     .max_memory(64 * 1024 * 1024)       // 64 MB
///     .build()?;
/// # Ok::<(), fox_feoxdb::FeOxDbError>(())
/// ```
///
/// Clones share the same underlying database. Pending
/// writes are flushed when the last clone is dropped.
#[derive(Clone)]
pub struct FeOxDbBackend<S = JsonFormat>
where
    S: Format,
{
    store: Arc<FeoxStore>,
    serializer: S,
    label: BackendLabel,
}

impl<S> FeOxDbBackend<S>
where
    S: Format,
{
    /// Forces pending writes to disk.
    ///
    /// FeOxDB buffers writes in memory and flushes them periodically.
    /// No-op in memory-only mode.
    pub fn flush(&self) {
        self.store.flush();
    }
}

impl FeOxDbBackend<JsonFormat> {
    /// Starts building a new backend.
    pub fn builder() -> FeOxDbBackendBuilder<JsonFormat> {
        FeOxDbBackendBuilder::default()
    }

    /// In-memory backend for tests.
    ///
    /// Data is lost when dropped. Equivalent to `builder().build()`.
    ///
    /// ```
    /// use fox_feoxdb::FeOxDbBackend;
    ///
    /// let backend = FeOxDbBackend::in_memory()
    ///     .expect("Failed to create in-memory backend");
    /// ```
    pub fn in_memory() -> Result<Self, FeOxDbError> {
        Self::builder().build()
    }
}

impl<S> Drop for FeOxDbBackend<S>
where
    S: Format,
{
    fn drop(&mut self) {
        if Arc::strong_count(&self.store) == 1 {
            self.store.flush();
        }
    }
}

/// Builder for [`FeOxDbBackend`].
///
/// ```no_run
/// use fox_feoxdb::FeOxDbBackend;
/// use fox_backend::BincodeFormat;
///
/// let backend = FeOxDbBackend::builder()
///     .path("wikidata_cache")
///     .value_format(BincodeFormat)
///     .label("wikidata")
///     .build()?;
/// # Ok::<(), fox_feoxdb::FeOxDbError>(())
/// ```
pub struct FeOxDbBackendBuilder<S = JsonFormat>
where
    S: Format,
{
    path: Option<PathBuf>,
    max_file_size: Option<u64>,
    max_memory: Option<usize>,
    serializer: S,
    label: BackendLabel,
}

impl Default for FeOxDbBackendBuilder<JsonFormat> {
    fn default() -> Self {
        Self {
            path: None,
            max_file_size: None,
            max_memory: None,
            serializer: JsonFormat,
            label: BackendLabel::new_static("feoxdb"),
        }
    }
}

impl<S> FeOxDbBackendBuilder<S>
where
    S: Format,
{
    /// Enables persistent storage at the given path.
    ///
    /// Without this, data lives only in memory and is lost on restart.
    /// An existing directory, or a missing path without an extension, is
    /// treated as a store directory (created if needed) holding `cache.db`.
    /// Anything else is used as the database file itself.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Pre-allocates disk space and caps maximum storage.
    ///
    /// Writes fail once the file is full. Ignored in memory-only mode.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Limits RAM usage.
    ///
    /// FeOxDB never evicts; writes fail with `OutOfMemory` when the limit is
    /// reached.
    pub fn max_memory(mut self, bytes: usize) -> Self {
        self.max_memory = Some(bytes);
        self
    }

    /// Identifies this backend in logs and metrics.
    pub fn label(mut self, label: impl Into<BackendLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Value serialization format.
    ///
    /// `JsonFormat` (default) keeps entries readable; `BincodeFormat` is
    /// smaller. A store must always be reopened with the format it was
    /// written with.
    pub fn value_format<NewS>(self, serializer: NewS) -> FeOxDbBackendBuilder<NewS>
    where
        NewS: Format,
    {
        FeOxDbBackendBuilder {
            path: self.path,
            max_file_size: self.max_file_size,
            max_memory: self.max_memory,
            serializer,
            label: self.label,
        }
    }

    /// Opens (or creates) the store.
    ///
    /// Fails if the database file can't be opened or created.
    pub fn build(self) -> Result<FeOxDbBackend<S>, FeOxDbError> {
        let mut builder = FeoxStore::builder();

        if let Some(path) = self.path {
            let file = resolve_db_file(path)?;
            tracing::debug!(path = %file.display(), "opening feoxdb store");
            builder = builder.device_path(file.to_string_lossy().to_string());
        }

        if let Some(file_size) = self.max_file_size {
            builder = builder.file_size(file_size);
        }

        if let Some(memory) = self.max_memory {
            builder = builder.max_memory(memory);
        }

        let store = builder.build()?;

        Ok(FeOxDbBackend {
            store: Arc::new(store),
            serializer: self.serializer,
            label: self.label,
        })
    }
}

fn resolve_db_file(mut path: PathBuf) -> Result<PathBuf, FeOxDbError> {
    if path.as_os_str().is_empty() {
        return Err(FeOxDbError::InvalidConfig("empty store path".to_string()));
    }

    if path.is_dir() || (!path.exists() && path.extension().is_none()) {
        std::fs::create_dir_all(&path)?;
        path.push(DB_FILE_NAME);
    } else if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    Ok(path)
}

#[async_trait]
impl<S> Backend for FeOxDbBackend<S>
where
    S: Format,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CachedResponse>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let encoded = tokio::task::spawn_blocking(move || match store.get(&key_bytes) {
            Ok(encoded) => Ok(Some(encoded)),
            Err(FeoxError::KeyNotFound) => Ok(None),
            Err(e) => Err(BackendError::InternalError(Box::new(e))),
        })
        .await
        .map_err(|e| BackendError::InternalError(Box::new(e)))??;

        match encoded {
            Some(bytes) => Ok(Some(self.serializer.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, key: &CacheKey, value: CachedResponse) -> BackendResult<()> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();
        let value_bytes = self.serializer.serialize(&value)?;

        tokio::task::spawn_blocking(move || {
            store
                .insert(&key_bytes, &value_bytes)
                .map_err(|e| BackendError::InternalError(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(|e| BackendError::InternalError(Box::new(e)))?
    }

    async fn contains(&self, key: &CacheKey) -> BackendResult<bool> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        tokio::task::spawn_blocking(move || store.contains_key(&key_bytes))
            .await
            .map_err(|e| BackendError::InternalError(Box::new(e)))
    }

    fn label(&self) -> BackendLabel {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fox_backend::{BincodeFormat, CacheBackend};
    use tempfile::TempDir;

    fn classify_response(isbn: &str) -> CachedResponse {
        CachedResponse::new(
            200,
            format!("http://classify.oclc.org/classify2/Classify?isbn={isbn}&summary=true"),
            "<classify><response code=\"0\"/></classify>",
        )
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FeOxDbBackend::builder()
            .path(temp_dir.path())
            .build()
            .unwrap();

        let key = CacheKey::from("http://classify.oclc.org/classify2/Classifyisbn-1_summary-true");
        backend.write(&key, classify_response("1")).await.unwrap();

        let result = backend.read(&key).await.unwrap();
        assert_eq!(result, Some(classify_response("1")));
        assert!(backend.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FeOxDbBackend::builder()
            .path(temp_dir.path())
            .build()
            .unwrap();

        let key = CacheKey::from("nonexistent-read");
        assert!(backend.read(&key).await.unwrap().is_none());
        assert!(!backend.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_is_key_not_found() {
        let backend = FeOxDbBackend::in_memory().unwrap();
        let key = CacheKey::from("never-written");

        assert!(matches!(
            backend.get(&key).await,
            Err(BackendError::KeyNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clone_shares_store() {
        let backend1 = FeOxDbBackend::in_memory().unwrap();
        let backend2 = backend1.clone();

        let key = CacheKey::from("shared-key");
        backend1.write(&key, classify_response("2")).await.unwrap();

        assert!(backend2.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_flush_persists_data() {
        let temp_dir = TempDir::new().unwrap();
        let key = CacheKey::from("persist-key");

        {
            let backend = FeOxDbBackend::builder()
                .path(temp_dir.path())
                .build()
                .unwrap();
            backend.write(&key, classify_response("3")).await.unwrap();
            backend.flush();
        }

        let backend = FeOxDbBackend::builder()
            .path(temp_dir.path().join("cache.db"))
            .build()
            .unwrap();
        let result = backend.get(&key).await.unwrap();
        assert_eq!(result, classify_response("3"));
    }

    #[tokio::test]
    async fn test_drop_releases_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let key = CacheKey::from(String::from("http://svc/xisbn-4"));

        {
            let backend = FeOxDbBackend::builder()
                .path(temp_dir.path())
                .build()
                .unwrap();
            backend.write(&key, classify_response("4")).await.unwrap();
        }

        let backend = FeOxDbBackend::builder()
            .path(temp_dir.path())
            .build()
            .unwrap();
        assert!(backend.contains(&CacheKey::from("http://svc/xisbn-4")).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let store_dir = temp_dir.path().join("demo_cache");

        let backend = FeOxDbBackend::builder().path(&store_dir).build().unwrap();
        backend
            .write(&CacheKey::from("k"), classify_response("5"))
            .await
            .unwrap();
        backend.flush();

        assert!(store_dir.is_dir());
        assert!(store_dir.join("cache.db").exists());
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = FeOxDbBackend::builder().path("").build();
        assert!(matches!(result, Err(FeOxDbError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_builder_with_label() {
        let backend = FeOxDbBackend::builder()
            .label("custom-label")
            .build()
            .unwrap();

        assert_eq!(backend.label().as_str(), "custom-label");
    }

    #[tokio::test]
    async fn test_builder_with_bincode_format() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FeOxDbBackend::builder()
            .path(temp_dir.path())
            .value_format(BincodeFormat)
            .build()
            .unwrap();

        let key = CacheKey::from("format-key");
        backend.write(&key, classify_response("6")).await.unwrap();
        assert_eq!(backend.get(&key).await.unwrap(), classify_response("6"));
    }
}
