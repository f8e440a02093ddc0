//! UC Press catalogue pages: the "About the book" description by ISBN.

use fox::{CachedResponse, Column, Fields, Identifier, RequestConfigUpdate, Row};
use regex::Regex;

/// Rows from other publishers are left alone.
pub const PUBLISHER: &str = "University of California Press";
/// ISBN columns, tried in this order.
pub const ISBN_COLUMNS: [&str; 3] = ["ebook", "hardcover", "paper"];
/// Columns of the output file.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "handle",
    "title",
    "subtitle",
    "publisher",
    "ebook",
    "hardcover",
    "paper",
    "description",
];

/// The catalogue page for one ISBN.
pub fn book_request(isbn: &Identifier) -> RequestConfigUpdate {
    RequestConfigUpdate::new().base(format!("https://www.ucpress.edu/book/{}", isbn.value))
}

/// Whether a row belongs to the UC Press list.
pub fn is_ucpress(row: &Row) -> bool {
    row.get("publisher") == Some(PUBLISHER)
}

/// The ISBN candidates, in lookup order.
pub fn candidates() -> [Column; 3] {
    ISBN_COLUMNS.map(Column::new)
}

/// Pulls the book description out of a catalogue page.
///
/// Paragraph and line breaks become newlines, emphasis tags are kept
/// verbatim and every other tag is dropped.
pub struct Description {
    article: Regex,
    tag: Regex,
    blank_lines: Regex,
}

impl Description {
    /// Compiles the patterns.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            article: Regex::new(
                r#"(?s)<section[^>]*id="link-about-book"[^>]*>.*?<article[^>]*>(.*?)</article>"#,
            )?,
            tag: Regex::new(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)[^>]*?(/?)>")?,
            blank_lines: Regex::new(r"\n\s*\n")?,
        })
    }

    /// `description`, when the page has a non-empty one.
    pub fn extract(&self, response: &CachedResponse) -> Option<Fields> {
        let article = self.article.captures(&response.body)?.get(1)?.as_str();
        let text = self.text_with_newlines(article);
        if text.is_empty() {
            tracing::info!(url = %response.url, "empty description");
            return None;
        }

        let mut fields = Fields::new();
        fields.insert("description".to_string(), text);
        Some(fields)
    }

    fn text_with_newlines(&self, html: &str) -> String {
        let text = self.tag.replace_all(html, |caps: &regex::Captures<'_>| {
            let name = caps[2].to_ascii_lowercase();
            match name.as_str() {
                "em" | "i" => caps[0].to_string(),
                "br" | "p" | "div" | "article" => "\n".to_string(),
                _ => String::new(),
            }
        });
        let text = decode_entities(&text);
        self.blank_lines.replace_all(&text, "\n").trim().to_string()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rsquo;", "\u{2019}")
        .replace("&lsquo;", "\u{2018}")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fox::Candidate;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<html><body>
<section class="tabs" id="link-about-book">
  <h2>About the Book</h2>
  <article class="body">
    <p>A history of <em>The Grapes of Wrath</em> &amp; its readers.</p>
    <p>Second paragraph.<br/>Same paragraph, new line.</p>
  </article>
</section>
</body></html>"#;

    fn page(body: &str) -> CachedResponse {
        CachedResponse::new(200, "https://www.ucpress.edu/book/9780520343078", body)
    }

    #[test]
    fn test_description_keeps_emphasis_and_breaks() {
        let fields = Description::new().unwrap().extract(&page(PAGE)).unwrap();

        assert_eq!(
            fields["description"],
            "A history of <em>The Grapes of Wrath</em> & its readers.\n\
             Second paragraph.\nSame paragraph, new line."
        );
    }

    #[test]
    fn test_page_without_section_yields_nothing() {
        let description = Description::new().unwrap();

        assert_eq!(description.extract(&page("<html><article>x</article></html>")), None);
        assert_eq!(
            description.extract(&page(
                r#"<section id="link-about-book"><article> <p></p> </article></section>"#
            )),
            None
        );
    }

    #[test]
    fn test_only_ucpress_rows_qualify() {
        let ucpress: Row = [("publisher", Some(PUBLISHER.to_string()))].into_iter().collect();
        let other: Row = [("publisher", Some("Temple University Press".to_string()))]
            .into_iter()
            .collect();

        assert!(is_ucpress(&ucpress));
        assert!(!is_ucpress(&other));
        assert!(!is_ucpress(&Row::new()));
    }

    #[test]
    fn test_ebook_is_tried_first() {
        let row: Row = [
            ("ebook", Some("9780520976900".to_string())),
            ("paper", Some("9780520343078".to_string())),
        ]
        .into_iter()
        .collect();

        let first = candidates().iter().find_map(|c| c.identifier(&row)).unwrap();
        assert_eq!(first, Identifier::new("ebook", "9780520976900"));

        let update = book_request(&first);
        assert_eq!(
            update.base.as_deref(),
            Some("https://www.ucpress.edu/book/9780520976900")
        );
        assert!(update.parameters.is_none());
    }
}
