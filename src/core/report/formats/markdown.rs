//! Markdown report generator
//!
//! Generates graduation-progress reports in Markdown format. These reports
//! render well in GitHub, GitLab, and VS Code.

use crate::core::report::formats::course_line;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        // Substitute header metadata
        output = output.replace("{{student_name}}", &ctx.student.name);
        output = output.replace("{{student_id}}", &ctx.student.student_id);
        output = output.replace("{{department}}", &ctx.student.department);

        // Substitute credit totals
        let summary = &ctx.analysis.summary;
        output = output.replace("{{total_required}}", &summary.total_required.to_string());
        output = output.replace("{{total_completed}}", &summary.total_completed.to_string());
        output = output.replace("{{total_missing}}", &summary.total_missing.to_string());

        // Generate the list sections
        output = output.replace(
            "{{classification_shortfalls}}",
            &Self::generate_shortfall_table(ctx),
        );
        output = output.replace("{{rule_status}}", &Self::generate_rule_list(ctx));
        output = output.replace(
            "{{missing_required}}",
            &Self::generate_missing_required_list(ctx),
        );
        output = output.replace(
            "{{recommendations}}",
            &Self::generate_recommendation_list(ctx),
        );

        output
    }

    /// Generate the per-classification shortfall table
    fn generate_shortfall_table(ctx: &ReportContext) -> String {
        let shortfalls = ctx.shortfalls();
        if shortfalls.is_empty() {
            return "All classification minimums are satisfied.".to_string();
        }

        let mut table = String::new();
        table.push_str("| Classification | Required | Completed | Missing |\n");
        table.push_str("|---|---|---|---|\n");
        for status in shortfalls {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                status.classification, status.required, status.completed, status.missing
            );
        }
        table
    }

    /// Generate the detailed-requirement status list
    fn generate_rule_list(ctx: &ReportContext) -> String {
        if ctx.analysis.rule_outcomes.is_empty() {
            return "No detailed requirements configured.".to_string();
        }

        let mut list = String::new();
        for outcome in &ctx.analysis.rule_outcomes {
            if outcome.satisfied {
                let _ = writeln!(list, "- ✅ **{}**", outcome.name);
                continue;
            }
            let _ = writeln!(list, "- ❌ **{}**: {}", outcome.name, outcome.description);
            if !outcome.missing_courses.is_empty() {
                let _ = writeln!(
                    list,
                    "  - Missing courses: {}",
                    outcome.missing_courses.join(", ")
                );
            }
            if !outcome.missing_areas.is_empty() {
                let _ = writeln!(
                    list,
                    "  - Remaining areas: {}",
                    outcome.missing_areas.join(", ")
                );
            }
            if let Some(detail) = &outcome.detail {
                let _ = writeln!(list, "  - Progress: {detail}");
            }
        }
        list
    }

    /// Generate the missing required-course list
    fn generate_missing_required_list(ctx: &ReportContext) -> String {
        if ctx.analysis.missing_required_courses.is_empty() {
            return "None. Every required course is already taken.".to_string();
        }

        let mut list = String::new();
        for course in &ctx.analysis.missing_required_courses {
            let _ = writeln!(list, "- {course}");
        }
        list
    }

    /// Generate the categorized recommendation list
    fn generate_recommendation_list(ctx: &ReportContext) -> String {
        if ctx.recommendations.is_empty() {
            return "No open courses to recommend right now.".to_string();
        }

        let mut list = String::new();
        for category in ctx.recommendations.categories() {
            let _ = writeln!(list, "### {}", category.label);
            let _ = writeln!(list);
            for course in &category.courses {
                let _ = writeln!(list, "{}", course_line(course));
            }
            let _ = writeln!(list);
        }
        list
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
