//! Report generation for graduation-progress analyses
//!
//! Renders the evaluator and recommender output as a structured report with
//! deterministic sections: credit summary, classification shortfalls, rule
//! status, missing required courses, and categorized recommendations. The
//! plain-text format feeds downstream natural-language tooling; the Markdown
//! format renders well in GitHub and VS Code.

pub mod formats;

use crate::core::evaluator::{Analysis, ClassificationStatus};
use crate::core::models::Student;
use crate::core::recommender::Recommendations;
use std::error::Error;
use std::path::Path;

pub use formats::{MarkdownReporter, ReportFormat, TextReporter};

/// Data context for report generation
///
/// Aggregates everything a report needs, so format implementations share a
/// single source of truth.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Student the report is about
    pub student: &'a Student,
    /// Graduation-progress analysis
    pub analysis: &'a Analysis,
    /// Categorized course suggestions
    pub recommendations: &'a Recommendations,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        student: &'a Student,
        analysis: &'a Analysis,
        recommendations: &'a Recommendations,
    ) -> Self {
        Self {
            student,
            analysis,
            recommendations,
        }
    }

    /// Classifications with a positive shortfall, in analysis order
    #[must_use]
    pub fn shortfalls(&self) -> Vec<&ClassificationStatus> {
        self.analysis
            .by_classification
            .iter()
            .filter(|s| s.missing > 0)
            .collect()
    }

    /// Total number of recommended courses across all categories
    #[must_use]
    pub fn recommendation_count(&self) -> usize {
        self.recommendations.total_count()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
