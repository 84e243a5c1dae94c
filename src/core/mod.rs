//! Core module for `GradAdvisor`
//!
//! Everything the advisory pipeline needs, in pipeline order: catalog text
//! ingestion, the store, the requirements table, the evaluator, the
//! recommender, and report rendering.

pub mod config;
pub mod evaluator;
pub mod ingest;
pub mod models;
pub mod recommender;
pub mod report;
pub mod requirements;
pub mod store;

/// Returns the current version of the `GradAdvisor` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
