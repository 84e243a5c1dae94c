//! Enrollment model

use serde::{Deserialize, Serialize};

use super::course::normalize_name;

/// Grades excluded from every credit computation.
///
/// `P` (pass) counts toward credit; `NP` (no-pass) does not.
pub const EXCLUDED_GRADES: [&str; 3] = ["F", "W", "NP"];

/// Represents one completed (or attempted) course on a student's transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Owning student's identifier
    pub student_id: String,

    /// Course name as recorded on the transcript
    pub course_name: String,

    /// Earned credit value; unset when the registry has no credit on record
    pub credits: Option<f32>,

    /// Letter grade (e.g., "A+", "P", "F")
    pub grade: String,

    /// Credit classification the course counted under (e.g., "전필")
    pub classification: String,
}

impl Enrollment {
    /// Create a new enrollment
    #[must_use]
    pub const fn new(
        student_id: String,
        course_name: String,
        credits: Option<f32>,
        grade: String,
        classification: String,
    ) -> Self {
        Self {
            student_id,
            course_name,
            credits,
            grade,
            classification,
        }
    }

    /// Credit value counted toward graduation
    ///
    /// # Returns
    /// Zero for excluded grades ([`EXCLUDED_GRADES`]) or when no credit value
    /// is on record; the recorded credits otherwise.
    #[must_use]
    pub fn counted_credits(&self) -> f32 {
        if EXCLUDED_GRADES.contains(&self.grade.as_str()) {
            0.0
        } else {
            self.credits.unwrap_or(0.0)
        }
    }

    /// Course name with all whitespace removed
    #[must_use]
    pub fn normalized_course_name(&self) -> String {
        normalize_name(&self.course_name)
    }
}
