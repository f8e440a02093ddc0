//! The request dispatcher.
//!
//! [`Fox`] owns the current [`RequestConfig`], recomputes the canonical
//! [`CacheKey`] on every change, and decides per dispatch whether the request
//! has to go out at all:
//!
//! ```text
//! configure ──> key
//! dispatch:
//!   no base ─────────────────────────────> MalformedConfig
//!   cache has key ───────────────────────> Cached       (no delay, no call)
//!   otherwise: [delay] ─> upstream call
//!       status not accepted ─────────────> Rejected     (never stored)
//!       status accepted ─> [store] ──────> Fetched
//! ```

use std::sync::Arc;
use std::time::Duration;

use fox_backend::{Backend, BackendError, CacheBackend};
use fox_core::{
    CacheKey, CachedResponse, OutboundRequest, RequestConfig, RequestConfigUpdate, Upstream,
};
use tokio::time::Instant;

use crate::FoxError;
use crate::metrics;

/// Outcome of a successful [`Fox::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The key was already stored; nothing was sent.
    ///
    /// The stored response is read back with
    /// [`CacheBackend::get`] or through [`Fox::fetch`].
    Cached {
        /// Key of the stored entry.
        key: CacheKey,
    },
    /// A live call returned an accepted status.
    Fetched {
        /// The live response.
        response: CachedResponse,
        /// Whether it was written to the attached cache.
        stored: bool,
    },
    /// A live call returned a status outside the accepted set.
    ///
    /// The response is handed back for diagnostics but was not stored.
    Rejected {
        /// The live response.
        response: CachedResponse,
    },
}

impl Dispatch {
    /// Whether the dispatch was answered by the cache.
    pub fn is_hit(&self) -> bool {
        matches!(self, Dispatch::Cached { .. })
    }

    /// Whether the outcome carries usable data.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Dispatch::Rejected { .. })
    }

    /// The live response, if a call was made.
    pub fn response(&self) -> Option<&CachedResponse> {
        match self {
            Dispatch::Cached { .. } => None,
            Dispatch::Fetched { response, .. } | Dispatch::Rejected { response } => Some(response),
        }
    }
}

/// Request wrapper that sends each distinct request at most once.
///
/// ```no_run
/// # use fox::{Fox, RequestConfigUpdate};
/// # use fox_backend::MemoryBackend;
/// # use std::sync::Arc;
/// # use std::time::Duration;
/// # async fn demo<U: fox::Upstream>(upstream: U) -> Result<(), fox::FoxError> {
/// let mut fox = Fox::new(upstream).with_cache(Arc::new(MemoryBackend::new()));
/// fox.configure(
///     RequestConfigUpdate::new()
///         .header("User-Agent", "fox")
///         .accepted_statuses([200]),
/// );
///
/// fox.configure(
///     RequestConfigUpdate::new()
///         .base("http://classify.oclc.org/classify2/Classify")
///         .parameter("isbn", "9781621064657")
///         .parameter("summary", "true"),
/// );
/// if let Some(response) = fox.fetch(Some(Duration::from_secs(3))).await? {
///     println!("{}", response.body);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Fox<U> {
    config: RequestConfig,
    key: Option<CacheKey>,
    cache: Option<Arc<dyn Backend>>,
    upstream: U,
}

impl<U> Fox<U> {
    /// Creates a dispatcher with no cache attached.
    pub fn new(upstream: U) -> Self {
        Self {
            config: RequestConfig::default(),
            key: None,
            cache: None,
            upstream,
        }
    }

    /// Attaches a cache, consuming and returning the dispatcher.
    pub fn with_cache(mut self, cache: Arc<dyn Backend>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attaches a cache, replacing any previous one.
    pub fn attach_cache(&mut self, cache: Arc<dyn Backend>) {
        self.cache = Some(cache);
    }

    /// Detaches and returns the current cache.
    pub fn detach_cache(&mut self) -> Option<Arc<dyn Backend>> {
        self.cache.take()
    }

    /// The attached cache, if any.
    pub fn cache(&self) -> Option<&Arc<dyn Backend>> {
        self.cache.as_ref()
    }

    /// Merges `update` into the current configuration and recomputes the key.
    pub fn configure(&mut self, update: RequestConfigUpdate) -> &mut Self {
        self.config.apply(update);
        self.key = self.config.cache_key();
        tracing::trace!(key = ?self.key, "request configured");
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// The canonical key of the current configuration.
    pub fn cache_key(&self) -> Option<&CacheKey> {
        self.key.as_ref()
    }

    /// The transport.
    pub fn upstream(&self) -> &U {
        &self.upstream
    }
}

impl<U> Fox<U>
where
    U: Upstream,
{
    /// Sends the configured request unless its key is already cached.
    ///
    /// `courtesy_delay` is slept before a live call and skipped entirely on
    /// a cache hit. Transport failures are returned as
    /// [`FoxError::Transport`] and never retried.
    pub async fn dispatch(
        &mut self,
        courtesy_delay: Option<Duration>,
    ) -> Result<Dispatch, FoxError> {
        let (Some(base), Some(key)) = (self.config.base.clone(), self.key.clone()) else {
            tracing::error!("dispatch called before a base url was configured");
            return Err(FoxError::MalformedConfig);
        };

        if let Some(cache) = &self.cache {
            if cache.contains(&key).await? {
                let label = cache.label();
                tracing::debug!(%key, backend = %label, "cache hit");
                metrics::record_hit(&label);
                return Ok(Dispatch::Cached { key });
            }
        }
        metrics::record_miss(self.cache.as_ref().map(|c| c.label()).as_ref());

        if let Some(delay) = courtesy_delay.filter(|d| !d.is_zero()) {
            tracing::debug!(?delay, "courtesy delay before live call");
            tokio::time::sleep(delay).await;
        }

        let request = OutboundRequest {
            base,
            parameters: self.config.parameters.clone(),
            headers: self.config.headers.clone(),
        };
        let started = Instant::now();
        let response = self.upstream.call(request).await?;
        metrics::record_upstream(started.elapsed());

        if !self.config.accepted_statuses.accepts(response.status) {
            tracing::warn!(
                status = response.status,
                url = %response.url,
                body = %response.body,
                "response status not accepted; not caching"
            );
            metrics::record_rejected(response.status);
            return Ok(Dispatch::Rejected { response });
        }

        tracing::info!(status = response.status, url = %response.url, "fetched");
        let stored = match &self.cache {
            Some(cache) => {
                cache.write(&key, response.clone()).await?;
                true
            }
            None => false,
        };

        Ok(Dispatch::Fetched { response, stored })
    }

    /// Dispatches and resolves the usable response.
    ///
    /// Returns the stored entry on a hit, the live response when its status
    /// was accepted, and `None` when it was rejected.
    pub async fn fetch(
        &mut self,
        courtesy_delay: Option<Duration>,
    ) -> Result<Option<CachedResponse>, FoxError> {
        match self.dispatch(courtesy_delay).await? {
            Dispatch::Cached { key } => {
                let cache = self
                    .cache
                    .as_ref()
                    .ok_or_else(|| BackendError::KeyNotFound(key.clone()))?;
                Ok(Some(cache.get(&key).await?))
            }
            Dispatch::Fetched { response, .. } => Ok(Some(response)),
            Dispatch::Rejected { .. } => Ok(None),
        }
    }
}
