//! Student model

use serde::{Deserialize, Serialize};

/// Represents an enrolled student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student identifier (e.g., "2021320045")
    pub student_id: String,

    /// Student name as stored in the registry
    pub name: String,

    /// Department the student graduates under (selects the requirements row)
    pub department: String,
}

impl Student {
    /// Create a new student
    #[must_use]
    pub const fn new(student_id: String, name: String, department: String) -> Self {
        Self {
            student_id,
            name,
            department,
        }
    }
}
