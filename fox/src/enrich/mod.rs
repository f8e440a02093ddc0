//! Row-by-row enrichment over a [`Fox`](crate::Fox) dispatcher.
//!
//! An [`Enricher`] walks a batch of [`Row`]s. For every row it tries an
//! ordered list of [`Candidate`]s; the first candidate whose identifier
//! produces a response the [`Extract`] step can read wins, and the extracted
//! fields are written back into the row. Remaining candidates are never
//! dispatched.

mod candidate;
mod enricher;
mod extract;
mod row;

pub use candidate::{Candidate, Column, Identifier};
pub use enricher::{EnrichReport, Enricher, RowOutcome};
pub use extract::{Extract, Fields};
pub use row::Row;
