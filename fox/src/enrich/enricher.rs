use std::time::Duration;

use fox_core::{RequestConfigUpdate, Upstream};

use super::{Candidate, Extract, Identifier, Row};
use crate::{Fox, FoxError};

type RowFilter = Box<dyn Fn(&Row) -> bool + Send + Sync>;

/// What happened to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Fields were written from the response for `identifier`.
    Enriched {
        /// The winning identifier.
        identifier: Identifier,
    },
    /// No candidate produced usable data. The row is unchanged.
    Unmatched,
    /// The row filter excluded the row; nothing was dispatched.
    Skipped,
}

/// Counts from one [`Enricher::enrich_rows`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Rows that received fields.
    pub enriched: usize,
    /// Rows where no candidate matched.
    pub unmatched: usize,
    /// Rows excluded by the filter.
    pub skipped: usize,
    /// Rows abandoned after an error.
    pub failed: usize,
}

impl EnrichReport {
    /// Total number of rows seen.
    pub fn total(&self) -> usize {
        self.enriched + self.unmatched + self.skipped + self.failed
    }
}

/// First-match-wins enrichment over an ordered list of candidates.
///
/// `R` turns an identifier into the request to send; `E` reads fields from
/// the response.
pub struct Enricher<R, E> {
    request: R,
    extractor: E,
    candidates: Vec<Box<dyn Candidate>>,
    filter: Option<RowFilter>,
    courtesy_delay: Option<Duration>,
}

impl<R, E> Enricher<R, E>
where
    R: Fn(&Identifier) -> RequestConfigUpdate + Send + Sync,
    E: Extract,
{
    /// Creates an enricher with no candidates and no courtesy delay.
    pub fn new(request: R, extractor: E) -> Self {
        Self {
            request,
            extractor,
            candidates: Vec::new(),
            filter: None,
            courtesy_delay: None,
        }
    }

    /// Appends a candidate; candidates are tried in insertion order.
    pub fn candidate(mut self, candidate: impl Candidate + 'static) -> Self {
        self.candidates.push(Box::new(candidate));
        self
    }

    /// Appends several candidates of the same kind.
    pub fn candidates<C, I>(mut self, candidates: I) -> Self
    where
        C: Candidate + 'static,
        I: IntoIterator<Item = C>,
    {
        self.candidates
            .extend(candidates.into_iter().map(|c| Box::new(c) as Box<dyn Candidate>));
        self
    }

    /// Only rows for which `filter` holds are looked up.
    pub fn filter(mut self, filter: impl Fn(&Row) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Delay before every live call. Cache hits are never delayed.
    pub fn courtesy_delay(mut self, delay: Duration) -> Self {
        self.courtesy_delay = Some(delay);
        self
    }

    /// Enriches a single row.
    ///
    /// Errors end the row early; fields are only written once a candidate
    /// fully succeeded, so a failed row is left as it was.
    pub async fn enrich_row<U>(
        &self,
        fox: &mut Fox<U>,
        row: &mut Row,
    ) -> Result<RowOutcome, FoxError>
    where
        U: Upstream,
    {
        if let Some(filter) = &self.filter {
            if !filter(row) {
                return Ok(RowOutcome::Skipped);
            }
        }

        for candidate in &self.candidates {
            let Some(identifier) = candidate.identifier(row) else {
                continue;
            };
            fox.configure((self.request)(&identifier));

            let Some(response) = fox.fetch(self.courtesy_delay).await? else {
                tracing::debug!(%identifier, "no accepted response");
                continue;
            };
            let Some(fields) = self.extractor.extract(&response) else {
                tracing::debug!(%identifier, url = %response.url, "nothing to extract");
                continue;
            };

            for (column, value) in fields {
                row.set(column, Some(value));
            }
            tracing::debug!(%identifier, "row enriched");
            return Ok(RowOutcome::Enriched { identifier });
        }

        Ok(RowOutcome::Unmatched)
    }

    /// Enriches every row in order. A failing row is logged and counted but
    /// does not stop the batch.
    pub async fn enrich_rows<U>(&self, fox: &mut Fox<U>, rows: &mut [Row]) -> EnrichReport
    where
        U: Upstream,
    {
        let mut report = EnrichReport::default();
        for (index, row) in rows.iter_mut().enumerate() {
            match self.enrich_row(fox, row).await {
                Ok(RowOutcome::Enriched { .. }) => report.enriched += 1,
                Ok(RowOutcome::Unmatched) => report.unmatched += 1,
                Ok(RowOutcome::Skipped) => report.skipped += 1,
                Err(error) => {
                    tracing::error!(row = index, %error, "row enrichment failed");
                    report.failed += 1;
                }
            }
        }
        tracing::info!(
            enriched = report.enriched,
            unmatched = report.unmatched,
            skipped = report.skipped,
            failed = report.failed,
            "enrichment finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{Column, Fields};
    use fox_core::{CachedResponse, OutboundRequest, UpstreamError};
    use std::future::Ready;

    #[derive(Clone)]
    struct Echo;

    impl Upstream for Echo {
        type Future = Ready<Result<CachedResponse, UpstreamError>>;

        fn call(&mut self, req: OutboundRequest) -> Self::Future {
            let id = req.parameters.get("id").cloned().unwrap_or_default();
            std::future::ready(Ok(CachedResponse::new(200, req.base, id)))
        }
    }

    fn enricher()
    -> Enricher<impl Fn(&Identifier) -> RequestConfigUpdate + Send + Sync, impl Extract> {
        Enricher::new(
            |id: &Identifier| {
                RequestConfigUpdate::new()
                    .base("http://svc/lookup")
                    .parameter("id", id.value.clone())
            },
            |response: &CachedResponse| {
                let mut fields = Fields::new();
                fields.insert("Found".to_string(), response.body.clone());
                Some(fields)
            },
        )
        .candidate(Column::new("A"))
    }

    #[tokio::test]
    async fn test_filter_skips_without_dispatch() {
        let enricher = enricher().filter(|row: &Row| row.get("Publisher") == Some("UC Press"));
        let mut fox = Fox::new(Echo);
        let mut row: Row = [("A", Some("1".to_string())), ("Publisher", Some("Other".to_string()))]
            .into_iter()
            .collect();

        let outcome = enricher.enrich_row(&mut fox, &mut row).await.unwrap();
        assert_eq!(outcome, RowOutcome::Skipped);
        assert!(fox.cache_key().is_none());
        assert!(!row.has_column("Found"));
    }

    #[tokio::test]
    async fn test_unmatched_leaves_row_alone() {
        let enricher = enricher();
        let mut fox = Fox::new(Echo);
        let mut row: Row = [("A", None::<String>)].into_iter().collect();
        let before = row.clone();

        let outcome = enricher.enrich_row(&mut fox, &mut row).await.unwrap();
        assert_eq!(outcome, RowOutcome::Unmatched);
        assert_eq!(row, before);
    }

    #[tokio::test]
    async fn test_report_totals() {
        let enricher = enricher();
        let mut fox = Fox::new(Echo);
        let mut rows: Vec<Row> = vec![
            [("A", Some("1".to_string()))].into_iter().collect(),
            [("A", None::<String>)].into_iter().collect(),
        ];

        let report = enricher.enrich_rows(&mut fox, &mut rows).await;
        assert_eq!(report.enriched, 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.total(), 2);
        assert_eq!(rows[0].get("Found"), Some("1"));
    }
}
