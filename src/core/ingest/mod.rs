//! Catalog ingestion
//!
//! Parses course records out of raw catalog text (one record per line) for
//! loading into the store. Text extraction from the published PDF happens
//! upstream; this module consumes the extracted text.

pub mod catalog_parser;

pub use catalog_parser::{
    parse_catalog_file, parse_catalog_text, CourseRecord, IngestError, ParseOutcome,
};
