use std::fmt;

use super::Row;

/// The identifier a [`Candidate`] pulled out of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Column the value came from.
    pub column: String,
    /// The identifier value, trimmed.
    pub value: String,
}

impl Identifier {
    /// Creates an identifier.
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.value)
    }
}

/// Tries to extract a lookup identifier from a row.
pub trait Candidate: Send + Sync {
    /// The identifier, or `None` when this candidate does not apply.
    fn identifier(&self, row: &Row) -> Option<Identifier>;
}

impl<F> Candidate for F
where
    F: Fn(&Row) -> Option<Identifier> + Send + Sync,
{
    fn identifier(&self, row: &Row) -> Option<Identifier> {
        self(row)
    }
}

/// Reads a named column. Missing, null, empty and blank values are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
}

impl Column {
    /// A candidate reading `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The column name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Candidate for Column {
    fn identifier(&self, row: &Row) -> Option<Identifier> {
        let value = row.get(&self.name)?.trim();
        if value.is_empty() {
            return None;
        }
        Some(Identifier::new(self.name.clone(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_skips_blank_values() {
        let row: Row = [
            ("A", None),
            ("B", Some("  ".to_string())),
            ("C", Some(" 978 ".to_string())),
        ]
        .into_iter()
        .collect();

        assert_eq!(Column::new("A").identifier(&row), None);
        assert_eq!(Column::new("B").identifier(&row), None);
        assert_eq!(Column::new("missing").identifier(&row), None);
        assert_eq!(
            Column::new("C").identifier(&row),
            Some(Identifier::new("C", "978"))
        );
    }

    #[test]
    fn test_closure_candidate() {
        let digits_only = |row: &Row| {
            let value: String = row.get("ISBN")?.chars().filter(char::is_ascii_digit).collect();
            Some(Identifier::new("ISBN", value))
        };
        let row: Row = [("ISBN", Some("978-1-56639".to_string()))].into_iter().collect();

        assert_eq!(
            digits_only.identifier(&row).map(|id| id.value),
            Some("978156639".to_string())
        );
    }
}
