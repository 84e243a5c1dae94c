//! Shared library for `GradAdvisor`
//!
//! Exposes the analysis core consumed by the `gradvisor` CLI: catalog and
//! transcript models, the department requirements table, the graduation
//! evaluator and course recommender, the SQLite-backed store, catalog text
//! ingestion, and report rendering.

pub mod core;
pub mod logger;

pub use core::config;
