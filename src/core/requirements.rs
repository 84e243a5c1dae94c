//! Department graduation requirements
//!
//! Requirement tables are static configuration: loaded once from TOML and
//! passed explicitly into the evaluator and recommender. Nothing here reads
//! global state, so tests can inject alternate department rules freely.
//!
//! A table looks like:
//!
//! ```toml
//! major_classifications = ["전필", "전선", "심선"]
//!
//! [departments."컴퓨터공학과"]
//! total_credits = 130
//! required_courses = ["자료구조", "운영체제"]
//!
//! [departments."컴퓨터공학과".classification_credits]
//! "전필" = 30
//! "전선" = 21
//!
//! [departments."컴퓨터공학과".detailed_requirements."기초과학"]
//! description = "기초과학 교과목에서 9학점 이상"
//! type = "credit_sum"
//! classifications = ["기필"]
//! required_credits = 9
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a requirements table
#[derive(Debug, Error)]
pub enum RequirementsError {
    /// The requirements file could not be read
    #[error("failed to read requirements file: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML contents are malformed or do not match the table schema
    #[error("failed to parse requirements table: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One composite requirement variant, tagged by `type` in the TOML source
///
/// Each variant carries its own payload; evaluation dispatches by pattern
/// matching, never by string tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Combined credits across the listed classifications must reach a minimum
    CreditSum {
        /// Classifications whose credits count toward this rule
        classifications: Vec<String>,
        /// Minimum combined credits
        required_credits: u32,
    },
    /// Every listed course must be taken
    TakeAll {
        /// Course names, all required
        courses: Vec<String>,
    },
    /// At least one listed course must be taken
    TakeOneOrMore {
        /// Course names, any one sufficient
        courses: Vec<String>,
    },
    /// A minimum number of thematic areas must each have a taken course
    AreaBased {
        /// Area name to its qualifying course list
        areas: BTreeMap<String, Vec<String>>,
        /// Minimum count of covered areas
        num_areas_required: usize,
    },
}

/// A named requirement rule: report description plus the typed spec
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    /// Human-readable description shown in reports
    pub description: String,

    /// The rule variant and its payload
    #[serde(flatten)]
    pub spec: RuleSpec,
}

/// Graduation requirements for one department
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Requirements {
    /// Total credits required to graduate
    pub total_credits: u32,

    /// Minimum credits per classification
    #[serde(default)]
    pub classification_credits: BTreeMap<String, u32>,

    /// Courses every student of the department must take
    #[serde(default)]
    pub required_courses: Vec<String>,

    /// Composite rules keyed by rule name; key order drives report order
    #[serde(default)]
    pub detailed_requirements: BTreeMap<String, Rule>,
}

/// Requirement tables for all configured departments
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequirementsTable {
    /// Classifications whose make-up suggestions draw from the student's own
    /// department pool; every other classification draws from the
    /// department-unrestricted pool
    #[serde(default)]
    pub major_classifications: Vec<String>,

    /// Requirements keyed by department name
    #[serde(default)]
    pub departments: BTreeMap<String, Requirements>,
}

impl RequirementsTable {
    /// Parse a requirements table from a TOML string
    ///
    /// # Errors
    /// Returns [`RequirementsError::Parse`] when the TOML is malformed,
    /// a rule carries an unknown `type` tag, or a payload field is missing.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RequirementsError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a requirements table from a TOML file
    ///
    /// # Errors
    /// Returns [`RequirementsError::Io`] when the file cannot be read and
    /// [`RequirementsError::Parse`] when its contents do not parse.
    pub fn from_toml_file(path: &Path) -> Result<Self, RequirementsError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Requirements for a department, if configured
    #[must_use]
    pub fn for_department(&self, department: &str) -> Option<&Requirements> {
        self.departments.get(department)
    }

    /// Whether make-up suggestions for this classification draw from the
    /// student's own department pool
    #[must_use]
    pub fn is_major_classification(&self, classification: &str) -> bool {
        self.major_classifications
            .iter()
            .any(|c| c == classification)
    }
}
