//! Response acceptance policy.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The default accepted status code.
pub const OK: u16 = 200;

/// Set of status codes whose responses are worth keeping.
///
/// Responses with any other status are reported to the caller but never
/// written to a cache. Defaults to `{200}`.
///
/// ```
/// use fox_core::AcceptedStatuses;
///
/// let statuses = AcceptedStatuses::from([200, 203]);
/// assert!(statuses.accepts(203));
/// assert!(!statuses.accepts(404));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcceptedStatuses(BTreeSet<u16>);

impl AcceptedStatuses {
    /// Whether a response with `status` is accepted.
    #[inline]
    pub fn accepts(&self, status: u16) -> bool {
        self.0.contains(&status)
    }

    /// Iterates over accepted codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    /// Whether no status is accepted at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AcceptedStatuses {
    fn default() -> Self {
        Self(BTreeSet::from([OK]))
    }
}

impl<const N: usize> From<[u16; N]> for AcceptedStatuses {
    fn from(codes: [u16; N]) -> Self {
        Self(BTreeSet::from(codes))
    }
}

impl From<Vec<u16>> for AcceptedStatuses {
    fn from(codes: Vec<u16>) -> Self {
        codes.into_iter().collect()
    }
}

impl FromIterator<u16> for AcceptedStatuses {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ok_only() {
        let statuses = AcceptedStatuses::default();
        assert_eq!(statuses.iter().collect::<Vec<_>>(), vec![200]);
    }

    #[test]
    fn test_deserialize_from_list() {
        let statuses: AcceptedStatuses = serde_json::from_str("[404, 200, 200]").unwrap();
        assert_eq!(statuses.iter().collect::<Vec<_>>(), vec![200, 404]);
    }

    #[test]
    fn test_empty_accepts_nothing() {
        let statuses = AcceptedStatuses::from(Vec::new());
        assert!(statuses.is_empty());
        assert!(!statuses.accepts(200));
    }
}
