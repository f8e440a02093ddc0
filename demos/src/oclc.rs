//! OCLC Classify: work identifiers and holdings counts by ISBN.

use std::collections::HashMap;

use fox::{CachedResponse, Fields, Identifier, RequestConfigUpdate};
use regex::Regex;

/// Classify API endpoint; answers XML.
pub const CLASSIFY_URL: &str = "http://classify.oclc.org/classify2/Classify";
/// ISBN columns, tried in this order.
pub const ISBN_COLUMNS: [&str; 3] = ["HC_ISBN", "PBK_ISBN", "EBook_ISBN"];
/// Columns of the output file.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "Title",
    "Subtitle",
    "HC_ISBN",
    "PBK_ISBN",
    "EBook_ISBN",
    "OCLC Work Identifier",
    "Holdings Count",
];

/// Summary lookup for one ISBN.
pub fn classify_request(isbn: &Identifier) -> RequestConfigUpdate {
    RequestConfigUpdate::new()
        .base(CLASSIFY_URL)
        .parameter("isbn", isbn.value.clone())
        .parameter("summary", "true")
}

/// Pulls the work identifier and holdings out of a Classify XML body.
pub struct Classify {
    response_code: Regex,
    work: Regex,
    attribute: Regex,
}

impl Classify {
    /// Compiles the patterns.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            response_code: Regex::new(r#"<response\s[^>]*code="(\d+)""#)?,
            work: Regex::new(r"<work\s[^>]*>")?,
            attribute: Regex::new(r#"(\w+)="([^"]*)""#)?,
        })
    }

    fn attributes<'a>(&self, tag: &'a str) -> HashMap<&'a str, &'a str> {
        self.attribute
            .captures_iter(tag)
            .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
            .collect()
    }

    /// `OCLC Work Identifier` and `Holdings Count`, when the body names a work.
    pub fn extract(&self, response: &CachedResponse) -> Option<Fields> {
        let body = response.body.as_str();
        let code = self.response_code.captures(body)?.get(1)?.as_str();

        let (owi, holdings) = match code {
            // Single work: summary element carries print and electronic counts.
            "0" => {
                let work = self.attributes(self.work.find(body)?.as_str());
                let print: u64 = work.get("holdings")?.parse().ok()?;
                let electronic: u64 = work.get("eholdings")?.parse().ok()?;
                (work.get("owi")?.to_string(), print + electronic)
            }
            // Multiple works: take the first listed.
            "4" => {
                let works = &body[body.find("<works")?..];
                let work = self.attributes(self.work.find(works)?.as_str());
                let holdings: u64 = work.get("holdings")?.parse().ok()?;
                (work.get("owi")?.to_string(), holdings)
            }
            other => {
                tracing::info!(code = other, url = %response.url, "no work in classify response");
                return None;
            }
        };

        let mut fields = Fields::new();
        fields.insert("OCLC Work Identifier".to_string(), owi);
        fields.insert("Holdings Count".to_string(), holdings.to_string());
        Some(fields)
    }
}
