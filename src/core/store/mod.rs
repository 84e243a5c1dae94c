//! Student, enrollment, and course storage
//!
//! [`StudentStore`] is the read contract the evaluator and recommender
//! consume; [`SqliteStore`] is the bundled implementation. Advisory flows
//! only read. The write paths (catalog upserts, registry seeding) run as
//! separate batch operations, never during an advisory pass.

pub mod sqlite;

pub use sqlite::{SqliteStore, UpsertSummary};

use thiserror::Error;

use crate::core::models::{Course, Enrollment, Student};

/// Errors raised by store operations
///
/// A failed lookup is always an `Err`; "no matching rows" is `Ok` with an
/// empty result. Callers must never read a store outage as an empty
/// transcript.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Read contract for advisory data
pub trait StudentStore {
    /// Look up a student by identifier and exact name
    ///
    /// # Errors
    /// Returns [`StoreError`] when the lookup itself fails; an unknown
    /// id/name pair is `Ok(None)`.
    fn fetch_student(&self, student_id: &str, name: &str) -> Result<Option<Student>, StoreError>;

    /// Enrollments whose grade counts toward credit
    ///
    /// Rows with an excluded grade
    /// ([`EXCLUDED_GRADES`](crate::core::models::enrollment::EXCLUDED_GRADES))
    /// are filtered out at the store.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the lookup fails.
    fn fetch_enrollments(&self, student_id: &str) -> Result<Vec<Enrollment>, StoreError>;

    /// Non-cancelled catalog courses, minus the excluded names
    ///
    /// Name exclusion is whitespace-insensitive. When `departments` is
    /// given, only courses offered by those departments are returned;
    /// otherwise the whole catalog qualifies. Result order is stable
    /// (catalog insertion order).
    ///
    /// # Errors
    /// Returns [`StoreError`] when the lookup fails.
    fn fetch_available_courses(
        &self,
        excluded_names: &[String],
        departments: Option<&[String]>,
    ) -> Result<Vec<Course>, StoreError>;
}
