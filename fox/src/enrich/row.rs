use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One enrichment unit: an ordered mapping of column name to optional value.
///
/// Serializes as a plain JSON object, `null` for absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Option<String>>);

impl Row {
    /// An empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `column`, `None` when the column is missing or null.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(Option::as_deref)
    }

    /// Sets `column`, appending it when it does not exist yet.
    pub fn set(&mut self, column: impl Into<String>, value: Option<String>) {
        self.0.insert(column.into(), value);
    }

    /// Whether `column` exists, null or not.
    pub fn has_column(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Adds each of `columns` that is missing as a null column.
    ///
    /// Existing values are kept; new columns are appended in the given order.
    pub fn reindex<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            self.0.entry(column.into()).or_insert(None);
        }
    }

    /// Iterates columns in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Row(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
