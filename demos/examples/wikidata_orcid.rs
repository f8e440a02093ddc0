//! Looks up ORCID iDs on Wikidata for authors known by VIAF or LCCN.
//!
//! ```sh
//! cargo run -p fox-demos --example wikidata_orcid -- authors.json
//! ```

use std::path::PathBuf;

use fox::Enricher;
use fox_demos::run;
use fox_demos::wikidata::{OUTPUT_COLUMNS, candidates, extract_orcid, orcid_request};

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
        .unwrap_or_else(|| PathBuf::from("author_data_consolidated.json"));
    let config = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/wikidata.yaml");

    let mut job = run::open(&config)?;
    let mut rows = run::read_rows(&input, &OUTPUT_COLUMNS)?;

    let mut enricher = Enricher::new(orcid_request, extract_orcid).candidates(candidates());
    if let Some(delay) = job.courtesy_delay {
        enricher = enricher.courtesy_delay(delay);
    }

    let report = enricher.enrich_rows(&mut job.fox, &mut rows).await;
    println!(
        "{} ORCID iDs found, {} not found, {} failed",
        report.enriched, report.unmatched, report.failed
    );

    drop(job.fox.detach_cache());

    let output = run::write_rows(&rows)?;
    println!("Output written to {}", output.display());

    Ok(())
}
