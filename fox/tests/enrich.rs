mod common;

use std::sync::Arc;

use common::ScriptedUpstream;
use fox::backend::MemoryBackend;
use fox::{
    CachedResponse, Column, Enricher, Extract, Fields, Fox, Identifier, RequestConfigUpdate, Row,
    RowOutcome,
};

fn request(id: &Identifier) -> RequestConfigUpdate {
    RequestConfigUpdate::new()
        .base("http://svc/lookup")
        .parameter("id", id.value.clone())
}

fn body_as_title(response: &CachedResponse) -> Option<Fields> {
    if response.body.is_empty() {
        return None;
    }
    let mut fields = Fields::new();
    fields.insert("Title".to_string(), response.body.clone());
    Some(fields)
}

fn row(values: &[(&str, Option<&str>)]) -> Row {
    values
        .iter()
        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
        .collect()
}

fn enricher() -> Enricher<fn(&Identifier) -> RequestConfigUpdate, impl Extract> {
    Enricher::new(
        request as fn(&Identifier) -> RequestConfigUpdate,
        body_as_title,
    )
    .candidates(["A", "B", "C"].map(Column::new))
}

#[tokio::test]
async fn first_match_wins() {
    let upstream = ScriptedUpstream::new().respond("x", "from B").respond("y", "from C");
    let mut fox = Fox::new(upstream.clone());
    let mut row = row(&[("A", None), ("B", Some("x")), ("C", Some("y"))]);

    let outcome = enricher().enrich_row(&mut fox, &mut row).await.unwrap();

    assert_eq!(
        outcome,
        RowOutcome::Enriched {
            identifier: Identifier::new("B", "x")
        }
    );
    assert_eq!(row.get("Title"), Some("from B"));
    assert_eq!(upstream.calls_for("x"), 1);
    assert_eq!(upstream.calls_for("y"), 0);
    assert_eq!(upstream.total_calls(), 1);
}

#[tokio::test]
async fn rejected_candidate_falls_through() {
    let upstream = ScriptedUpstream::new().respond("y", "from C");
    let mut fox = Fox::new(upstream.clone()).with_cache(Arc::new(MemoryBackend::new()));
    let mut row = row(&[("A", Some("unknown")), ("B", None), ("C", Some("y"))]);

    let outcome = enricher().enrich_row(&mut fox, &mut row).await.unwrap();

    assert!(matches!(outcome, RowOutcome::Enriched { identifier } if identifier.column == "C"));
    assert_eq!(row.get("Title"), Some("from C"));
    assert_eq!(upstream.calls_for("unknown"), 1);
}

#[tokio::test]
async fn unusable_body_falls_through() {
    let upstream = ScriptedUpstream::new().respond("x", "").respond("y", "from C");
    let mut fox = Fox::new(upstream.clone());
    let mut row = row(&[("A", Some("x")), ("C", Some("y"))]);

    enricher().enrich_row(&mut fox, &mut row).await.unwrap();

    assert_eq!(row.get("Title"), Some("from C"));
    assert_eq!(upstream.total_calls(), 2);
}

#[tokio::test]
async fn no_candidate_leaves_output_null() {
    let upstream = ScriptedUpstream::new();
    let mut fox = Fox::new(upstream.clone()).with_cache(Arc::new(MemoryBackend::new()));
    let mut row = row(&[("A", Some("missing")), ("Title", None)]);

    let outcome = enricher().enrich_row(&mut fox, &mut row).await.unwrap();

    assert_eq!(outcome, RowOutcome::Unmatched);
    assert_eq!(row.get("Title"), None);
}

#[tokio::test]
async fn failing_row_does_not_abort_batch() {
    let upstream = ScriptedUpstream::new()
        .fail("broken")
        .respond("ok", "fine")
        .respond("later", "not tried");
    let mut fox = Fox::new(upstream.clone()).with_cache(Arc::new(MemoryBackend::new()));
    let mut rows = vec![
        row(&[("A", Some("broken")), ("B", Some("later"))]),
        row(&[("A", Some("ok"))]),
        row(&[("A", None)]),
    ];

    let report = enricher().enrich_rows(&mut fox, &mut rows).await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.enriched, 1);
    assert_eq!(report.unmatched, 1);
    assert_eq!(rows[0].get("Title"), None);
    assert_eq!(rows[1].get("Title"), Some("fine"));
    assert_eq!(upstream.calls_for("later"), 0);
}

#[tokio::test]
async fn shared_identifiers_hit_the_cache() {
    let upstream = ScriptedUpstream::new().respond("x", "shared");
    let mut fox = Fox::new(upstream.clone()).with_cache(Arc::new(MemoryBackend::new()));
    let mut rows = vec![
        row(&[("A", Some("x"))]),
        row(&[("B", Some("x"))]),
        row(&[("C", Some(" x "))]),
    ];

    let report = enricher().enrich_rows(&mut fox, &mut rows).await;

    assert_eq!(report.enriched, 3);
    assert_eq!(upstream.calls_for("x"), 1);
    assert!(rows.iter().all(|r| r.get("Title") == Some("shared")));
}
