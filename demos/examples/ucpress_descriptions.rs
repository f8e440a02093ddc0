//! Fills in book descriptions from the UC Press catalogue.
//!
//! Only rows whose `publisher` is University of California Press are looked
//! up. The e-book, hardcover and paperback ISBNs are tried in that order;
//! the first catalogue page with an "About the book" section fills
//! `description`.
//!
//! ```sh
//! cargo run -p fox-demos --example ucpress_descriptions -- books.json
//! ```

use std::path::PathBuf;

use fox::{CachedResponse, Enricher};
use fox_demos::run;
use fox_demos::ucpress::{Description, OUTPUT_COLUMNS, book_request, candidates, is_ucpress};

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
        .unwrap_or_else(|| PathBuf::from("ucpress_list.json"));
    let config = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/ucpress.yaml");

    let mut job = run::open(&config)?;
    let mut rows = run::read_rows(&input, &OUTPUT_COLUMNS)?;

    let description = Description::new()?;
    let mut enricher = Enricher::new(book_request, |response: &CachedResponse| {
        description.extract(response)
    })
    .candidates(candidates())
    .filter(is_ucpress);
    if let Some(delay) = job.courtesy_delay {
        enricher = enricher.courtesy_delay(delay);
    }

    let report = enricher.enrich_rows(&mut job.fox, &mut rows).await;
    println!(
        "{} described, {} not found, {} other publishers, {} failed",
        report.enriched, report.unmatched, report.skipped, report.failed
    );

    drop(job.fox.detach_cache());

    let output = run::write_rows(&rows)?;
    println!("Output written to {}", output.display());

    Ok(())
}
