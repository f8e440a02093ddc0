//! Enrichment jobs built on fox, one module per data source.
//!
//! Each module holds the request builder and the response extraction for
//! its source; the runnable entry points live in `examples/` and share the
//! loading and writing helpers in [`run`].

pub mod oclc;
pub mod run;
pub mod ucpress;
pub mod wikidata;
