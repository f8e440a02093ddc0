//! Enriches a book list with OCLC work identifiers and holdings counts.
//!
//! Rows are read from a JSON array of objects (first argument, default
//! `acq_long_list.json`). For each row the HC, paperback and e-book ISBNs
//! are tried in that order against the OCLC Classify API; the first one that
//! returns a work fills `OCLC Work Identifier` and `Holdings Count`.
//! Responses are kept in `demo_cache/`, so a second run sends nothing.
//!
//! ```sh
//! RUST_LOG=fox=debug,fox_demos=info cargo run -p fox-demos --example oclc_classify -- books.json
//! ```

use std::path::PathBuf;

use fox::{CachedResponse, Column, Enricher};
use fox_demos::oclc::{Classify, ISBN_COLUMNS, OUTPUT_COLUMNS, classify_request};
use fox_demos::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fox=info,fox_demos=info".into()),
        )
        .init();

    let input = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("acq_long_list.json"));
    let config = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/fox.yaml");

    let mut job = run::open(&config)?;
    let mut rows = run::read_rows(&input, &OUTPUT_COLUMNS)?;

    let classify = Classify::new()?;
    let mut enricher = Enricher::new(classify_request, |response: &CachedResponse| {
        classify.extract(response)
    })
    .candidates(ISBN_COLUMNS.map(Column::new));
    if let Some(delay) = job.courtesy_delay {
        enricher = enricher.courtesy_delay(delay);
    }

    let report = enricher.enrich_rows(&mut job.fox, &mut rows).await;
    println!(
        "{} enriched, {} not found, {} failed",
        report.enriched, report.unmatched, report.failed
    );

    // Release the store before writing output.
    drop(job.fox.detach_cache());

    let output = run::write_rows(&rows)?;
    println!("Output written to {}", output.display());

    Ok(())
}
