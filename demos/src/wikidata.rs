//! Wikidata SPARQL: ORCID identifiers for authors known by VIAF or LCCN.

use fox::{Candidate, CachedResponse, Column, Fields, Identifier, RequestConfigUpdate, Row};
use serde::Deserialize;

/// Query service endpoint.
pub const SPARQL_URL: &str = "https://query.wikidata.org/sparql";
/// Columns of the output file.
pub const OUTPUT_COLUMNS: [&str; 3] = ["VIAF_ID", "ORCID_ID", "LCCN"];

const QUERY: &str = r#"select ?person ?personLabel ?personDescription ?orcid ?viaf
    WHERE { ?person wdt:P31 wd:Q5. ?person wdt:P496 ?orcid . ?person SPARQL_CODE "ID_VALUE" .
    service wikibase:label { bd:serviceParam wikibase:language "en". }
    }"#;

/// Reads a column holding an identifier or an authority URL and keeps the
/// last path segment, so `http://viaf.org/viaf/12345` looks up `12345`.
#[derive(Debug, Clone)]
pub struct LastSegment(Column);

impl LastSegment {
    /// A candidate reading `name`.
    pub fn new(name: &str) -> Self {
        Self(Column::new(name))
    }
}

impl Candidate for LastSegment {
    fn identifier(&self, row: &Row) -> Option<Identifier> {
        let mut identifier = self.0.identifier(row)?;
        let segment = identifier.value.trim_end_matches('/').rsplit('/').next()?;
        if segment.is_empty() {
            return None;
        }
        identifier.value = segment.to_string();
        Some(identifier)
    }
}

/// VIAF first, then LCCN.
pub fn candidates() -> [LastSegment; 2] {
    [LastSegment::new("VIAF_ID"), LastSegment::new("LCCN")]
}

/// The Wikidata property holding identifiers from `column`: P244 for
/// `LCCN`, otherwise P214 (VIAF).
pub fn property(column: &str) -> &'static str {
    match column {
        "LCCN" => "wdt:P244",
        _ => "wdt:P214",
    }
}

/// The SPARQL lookup for a person carrying `id`.
pub fn orcid_request(id: &Identifier) -> RequestConfigUpdate {
    let query = QUERY
        .replace("SPARQL_CODE", property(&id.column))
        .replace("ID_VALUE", &id.value);

    RequestConfigUpdate::new()
        .base(SPARQL_URL)
        .parameter("query", query)
        .parameter("format", "json")
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: Bindings,
}

#[derive(Debug, Deserialize)]
struct Bindings {
    bindings: Vec<Binding>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    orcid: Option<Term>,
}

#[derive(Debug, Deserialize)]
struct Term {
    value: Option<String>,
}

/// `ORCID_ID` from the first binding that has one.
pub fn extract_orcid(response: &CachedResponse) -> Option<Fields> {
    let results: SparqlResults = match serde_json::from_str(&response.body) {
        Ok(results) => results,
        Err(error) => {
            tracing::warn!(%error, url = %response.url, "unreadable sparql results");
            return None;
        }
    };
    let orcid = results
        .results
        .bindings
        .into_iter()
        .find_map(|binding| binding.orcid?.value)?;

    let mut fields = Fields::new();
    fields.insert("ORCID_ID".to_string(), orcid);
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn results(body: &str) -> CachedResponse {
        CachedResponse::new(200, SPARQL_URL, body)
    }

    #[test]
    fn test_authority_url_reduced_to_last_segment() {
        let row: Row = [
            ("VIAF_ID", Some("http://viaf.org/viaf/59093806/".to_string())),
            ("LCCN", Some("n79021164".to_string())),
        ]
        .into_iter()
        .collect();

        let first = candidates().iter().find_map(|c| c.identifier(&row));
        assert_eq!(first, Some(Identifier::new("VIAF_ID", "59093806")));
    }

    #[test]
    fn test_lccn_used_when_viaf_missing() {
        let row: Row = [("VIAF_ID", None), ("LCCN", Some(" n79021164 ".to_string()))]
            .into_iter()
            .collect();

        let first = candidates().iter().find_map(|c| c.identifier(&row));
        assert_eq!(first, Some(Identifier::new("LCCN", "n79021164")));
    }

    #[test]
    fn test_query_names_property_and_value() {
        let update = orcid_request(&Identifier::new("LCCN", "n79021164"));

        assert_eq!(update.base.as_deref(), Some(SPARQL_URL));
        let parameters = update.parameters.unwrap();
        assert!(parameters["query"].contains(r#"?person wdt:P244 "n79021164" ."#));
        assert!(!parameters["query"].contains("SPARQL_CODE"));
        assert_eq!(parameters["format"], "json");
    }

    #[test]
    fn test_viaf_uses_p214() {
        let update = orcid_request(&Identifier::new("VIAF_ID", "59093806"));
        let parameters = update.parameters.unwrap();
        assert!(parameters["query"].contains(r#"?person wdt:P214 "59093806" ."#));
    }

    #[test]
    fn test_first_orcid_binding_wins() {
        let body = r#"{"head":{"vars":["person","orcid"]},"results":{"bindings":[
            {"person":{"type":"uri","value":"http://www.wikidata.org/entity/Q1"}},
            {"orcid":{"type":"literal","value":"0000-0002-1825-0097"}},
            {"orcid":{"type":"literal","value":"0000-0001-5109-3700"}}
        ]}}"#;

        let fields = extract_orcid(&results(body)).unwrap();
        assert_eq!(fields["ORCID_ID"], "0000-0002-1825-0097");
    }

    #[test]
    fn test_no_bindings_or_bad_json_yields_nothing() {
        assert_eq!(extract_orcid(&results(r#"{"results":{"bindings":[]}}"#)), None);
        assert_eq!(extract_orcid(&results("<html>rate limited</html>")), None);
    }
}
