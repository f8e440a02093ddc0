//! Request configuration and partial updates.
//!
//! [`RequestConfig`] is the full description of the next outbound request.
//! It is never rebuilt from scratch; instead successive
//! [`RequestConfigUpdate`]s are merged into it, each overwriting only the
//! fields it explicitly sets.
//!
//! Setting a new base always clears the current parameters, so every new
//! endpoint must restate its parameters. An update that sets both base and
//! parameters keeps the parameters it carries.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::key::CacheKey;
use crate::status::AcceptedStatuses;

/// Query parameters in insertion order.
pub type Parameters = IndexMap<String, String>;

/// Request headers in insertion order.
pub type Headers = IndexMap<String, String>;

/// Parameter names excluded from cache key computation.
pub type PrivateKeys = BTreeSet<String>;

/// Current configuration of a dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Endpoint URL. Without it no request can be sent.
    pub base: Option<String>,
    /// Query parameters sent with the request.
    #[serde(default)]
    pub parameters: Parameters,
    /// Headers sent with the request. Never part of the cache key.
    #[serde(default)]
    pub headers: Headers,
    /// Parameter names sent on the wire but left out of the cache key.
    #[serde(default)]
    pub private_keys: PrivateKeys,
    /// Status codes whose responses are kept.
    #[serde(default)]
    pub accepted_statuses: AcceptedStatuses,
}

impl RequestConfig {
    /// Merges `update` into this configuration.
    pub fn apply(&mut self, update: RequestConfigUpdate) {
        if let Some(base) = update.base {
            self.base = Some(base);
            self.parameters.clear();
        }
        if let Some(parameters) = update.parameters {
            self.parameters = parameters;
        }
        if let Some(headers) = update.headers {
            self.headers = headers;
        }
        if let Some(private_keys) = update.private_keys {
            self.private_keys = private_keys;
        }
        if let Some(accepted_statuses) = update.accepted_statuses {
            self.accepted_statuses = accepted_statuses;
        }
    }

    /// Computes the cache key for the current configuration.
    pub fn cache_key(&self) -> Option<CacheKey> {
        CacheKey::build(self.base.as_deref(), &self.parameters, &self.private_keys)
    }
}

/// A partial change to a [`RequestConfig`].
///
/// `None` means "leave as is". There is no way to unset a base once set;
/// switching endpoints is done by setting a different one.
///
/// ```
/// use fox_core::{RequestConfig, RequestConfigUpdate};
///
/// let mut config = RequestConfig::default();
/// config.apply(
///     RequestConfigUpdate::new()
///         .base("http://classify.oclc.org/classify2/Classify")
///         .parameter("isbn", "9781566395861")
///         .parameter("summary", "true"),
/// );
/// assert_eq!(config.parameters.len(), 2);
///
/// config.apply(RequestConfigUpdate::new().base("https://www.ucpress.edu/book/9780520"));
/// assert!(config.parameters.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfigUpdate {
    /// New endpoint; clears the current parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Replacement parameter set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
    /// Replacement header set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    /// Replacement private parameter names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_keys: Option<PrivateKeys>,
    /// Replacement acceptance policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_statuses: Option<AcceptedStatuses>,
}

impl RequestConfigUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Replaces the parameter set.
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Adds a single parameter to the replacement parameter set.
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(Parameters::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replaces the header set.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds a single header to the replacement header set.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replaces the private parameter names.
    pub fn private_keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.private_keys = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the acceptance policy.
    pub fn accepted_statuses(mut self, statuses: impl Into<AcceptedStatuses>) -> Self {
        self.accepted_statuses = Some(statuses.into());
        self
    }

    /// Layers `other` over `self`; fields set in `other` win.
    ///
    /// Setting a base in `other` without parameters drops the parameters of
    /// `self`, matching what [`RequestConfig::apply`] would do.
    pub fn merge(mut self, other: RequestConfigUpdate) -> Self {
        if other.base.is_some() {
            self.base = other.base;
            self.parameters = None;
        }
        if other.parameters.is_some() {
            self.parameters = other.parameters;
        }
        if other.headers.is_some() {
            self.headers = other.headers;
        }
        if other.private_keys.is_some() {
            self.private_keys = other.private_keys;
        }
        if other.accepted_statuses.is_some() {
            self.accepted_statuses = other.accepted_statuses;
        }
        self
    }
}
