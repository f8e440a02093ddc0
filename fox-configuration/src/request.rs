//! Request defaults applied before any per-row configuration.

use fox_core::{AcceptedStatuses, Headers, PrivateKeys, RequestConfigUpdate};
use serde::{Deserialize, Serialize};

/// Settings shared by every request of a run.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequestDefaults {
    /// Headers sent with every request.
    #[serde(default)]
    pub headers: Headers,
    /// Parameter names kept out of cache keys.
    #[serde(default)]
    pub private_keys: PrivateKeys,
    /// Statuses whose responses are stored. `[200]` when omitted.
    #[serde(default)]
    pub accepted_statuses: AcceptedStatuses,
}

impl RequestDefaults {
    /// As an update for [`RequestConfig::apply`](fox_core::RequestConfig::apply).
    ///
    /// Carries no base, so existing parameters are left alone.
    pub fn into_update(self) -> RequestConfigUpdate {
        RequestConfigUpdate::new()
            .headers(self.headers)
            .private_keys(self.private_keys)
            .accepted_statuses(self.accepted_statuses)
    }
}
