//! Course model

use serde::{Deserialize, Serialize};

/// Represents one course offering in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course code with any section suffix removed (e.g., "CSE2010")
    pub code: String,

    /// Section suffix split from the raw code (e.g., "01"); empty when the
    /// catalog lists a single section
    pub class_number: String,

    /// Ten-digit lecture number; unique identity key across the catalog
    pub lecture_number: String,

    /// Course name as printed in the catalog (may contain spaces)
    pub name: String,

    /// Offering department
    pub department: String,

    /// Credit classification (e.g., "전필", "교선"); unset until enriched
    pub classification: Option<String>,

    /// Credit value (can be fractional); unset until enriched
    pub credits: Option<f32>,

    /// Offering process type (e.g., "일반", "교직")
    pub process_type: String,

    /// Whether the offering was cancelled after catalog publication
    pub is_cancelled: bool,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `code` - Course code without section suffix
    /// * `lecture_number` - Ten-digit catalog identity key
    /// * `name` - Course name
    /// * `department` - Offering department
    #[must_use]
    pub const fn new(
        code: String,
        lecture_number: String,
        name: String,
        department: String,
    ) -> Self {
        Self {
            code,
            class_number: String::new(),
            lecture_number,
            name,
            department,
            classification: None,
            credits: None,
            process_type: String::new(),
            is_cancelled: false,
        }
    }

    /// Course name with all whitespace removed
    ///
    /// # Returns
    /// The stripped form used for drift-tolerant name comparison
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Whether this course carries the given classification
    #[must_use]
    pub fn has_classification(&self, classification: &str) -> bool {
        self.classification.as_deref() == Some(classification)
    }
}

/// Strip all whitespace from a course name.
///
/// Catalog extraction and transcript records disagree on spacing
/// ("자료 구조" vs "자료구조"); every name comparison uses the stripped form.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}
