//! Regex parser for catalog text
//!
//! A catalog line carries, in order: the offering process type, an optional
//! cancellation marker, the course code, the ten-digit lecture number, the
//! course name, the department, and a trailing contact column. Lines that do
//! not match the grammar are counted and skipped, never fatal.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Course line grammar.
///
/// Course names may contain spaces, so the name is matched lazily and the
/// department is constrained to a single token. Separators never cross line
/// boundaries.
static COURSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(계약\(DSC\)|일반|교직|계약|학석사통합|학석박사통합)[ \t]*(폐강)?[ \t]*([A-Z0-9]+)[ \t]+(\d{10})[ \t]+(.+?)[ \t]+(\S+)[ \t]+(\S+)\r?$",
    )
    .expect("course line pattern is valid")
});

/// Maximum digits split off the raw code as a section number
const CLASS_NUMBER_MAX_DIGITS: usize = 3;

/// Errors raised while ingesting catalog text
#[derive(Debug, Error)]
pub enum IngestError {
    /// The catalog file could not be read
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// One course record parsed from catalog text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    /// Offering process type (e.g., "일반", "교직")
    pub process_type: String,

    /// Course code with any section suffix removed
    pub code: String,

    /// Section suffix split from the raw code; empty when absent
    pub class_number: String,

    /// Ten-digit lecture number (catalog identity key)
    pub lecture_number: String,

    /// Course name
    pub name: String,

    /// Offering department
    pub department: String,

    /// Whether the line carried the cancellation marker
    pub is_cancelled: bool,
}

/// Result of parsing one catalog text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Records parsed, in catalog order
    pub records: Vec<CourseRecord>,

    /// Non-blank lines that did not match the record grammar
    pub skipped_lines: usize,
}

impl ParseOutcome {
    /// Number of parsed records flagged cancelled
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_cancelled).count()
    }
}

/// Parse course records out of catalog text
///
/// Unmatched non-blank lines are counted in
/// [`skipped_lines`](ParseOutcome::skipped_lines); the parse itself never
/// fails.
#[must_use]
pub fn parse_catalog_text(text: &str) -> ParseOutcome {
    let records: Vec<CourseRecord> = COURSE_LINE
        .captures_iter(text)
        .map(|caps| {
            let (code, class_number) = split_class_number(&caps[3]);
            CourseRecord {
                process_type: caps[1].to_string(),
                code,
                class_number,
                lecture_number: caps[4].to_string(),
                name: caps[5].to_string(),
                department: caps[6].to_string(),
                is_cancelled: caps.get(2).is_some(),
            }
        })
        .collect();

    let non_blank_lines = text.lines().filter(|line| !line.trim().is_empty()).count();
    ParseOutcome {
        skipped_lines: non_blank_lines.saturating_sub(records.len()),
        records,
    }
}

/// Parse course records out of a catalog text file
///
/// # Errors
/// Returns [`IngestError::Io`] when the file cannot be read.
pub fn parse_catalog_file<P: AsRef<Path>>(path: P) -> Result<ParseOutcome, IngestError> {
    Ok(parse_catalog_text(&fs::read_to_string(path)?))
}

/// Split a trailing section number off a raw course code.
///
/// The section is the trailing digit run, capped at
/// [`CLASS_NUMBER_MAX_DIGITS`], and only splits when the code is longer than
/// the run ("CSE201001" becomes "CSE201" + "001"; a bare "101" stays whole).
fn split_class_number(raw: &str) -> (String, String) {
    let digits = raw
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .count()
        .min(CLASS_NUMBER_MAX_DIGITS);
    // The grammar guarantees ASCII, so byte indexing is safe.
    let split_at = raw.len() - digits;
    if digits > 0 && split_at > 0 {
        (raw[..split_at].to_string(), raw[split_at..].to_string())
    } else {
        (raw.to_string(), String::new())
    }
}
