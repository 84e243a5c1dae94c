//! Plain-text report generator
//!
//! Generates the report format consumed by downstream natural-language
//! tooling. Sections are labeled with bracketed headers and every list entry
//! is a single `- ` line, so the output stays easy to post-process.

use crate::core::report::formats::course_line;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Plain-text report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[allow(clippy::unused_self)]
    fn render_report(&self, ctx: &ReportContext) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== Academic Progress Report ===");
        let _ = writeln!(
            out,
            "Student: {} ({})",
            ctx.student.name, ctx.student.student_id
        );
        let _ = writeln!(out, "Department: {}", ctx.student.department);

        let summary = &ctx.analysis.summary;
        let _ = writeln!(out);
        let _ = writeln!(out, "[Credit Summary]");
        let _ = writeln!(
            out,
            "Total required: {} / Completed: {} (Remaining: {})",
            summary.total_required, summary.total_completed, summary.total_missing
        );

        out.push_str(&Self::shortfall_section(ctx));
        out.push_str(&Self::rule_section(ctx));
        out.push_str(&Self::missing_required_section(ctx));
        out.push_str(&Self::recommendation_section(ctx));

        out
    }

    fn shortfall_section(ctx: &ReportContext) -> String {
        let mut section = String::new();
        let _ = writeln!(section);
        let _ = writeln!(section, "[Classification Shortfalls]");

        let shortfalls = ctx.shortfalls();
        if shortfalls.is_empty() {
            let _ = writeln!(section, "All classification minimums are satisfied.");
            return section;
        }
        for status in shortfalls {
            let _ = writeln!(
                section,
                "- {}: {} credits short",
                status.classification, status.missing
            );
        }
        section
    }

    fn rule_section(ctx: &ReportContext) -> String {
        let mut section = String::new();
        if ctx.analysis.rule_outcomes.is_empty() {
            return section;
        }

        let _ = writeln!(section);
        let _ = writeln!(section, "[Detailed Requirements]");
        for outcome in &ctx.analysis.rule_outcomes {
            if outcome.satisfied {
                let _ = writeln!(section, "- {}: ✅ satisfied", outcome.name);
                continue;
            }
            let _ = writeln!(section, "- {}: ❌ not satisfied", outcome.name);
            let _ = writeln!(section, "  Description: {}", outcome.description);
            if !outcome.missing_courses.is_empty() {
                let _ = writeln!(
                    section,
                    "  Missing courses: {}",
                    outcome.missing_courses.join(", ")
                );
            }
            if !outcome.missing_areas.is_empty() {
                let _ = writeln!(
                    section,
                    "  Remaining areas: {}",
                    outcome.missing_areas.join(", ")
                );
            }
            if let Some(detail) = &outcome.detail {
                let _ = writeln!(section, "  Progress: {detail}");
            }
        }
        section
    }

    fn missing_required_section(ctx: &ReportContext) -> String {
        let mut section = String::new();
        let _ = writeln!(section);
        let _ = writeln!(section, "[Missing Required Courses]");

        if ctx.analysis.missing_required_courses.is_empty() {
            let _ = writeln!(section, "None. Every required course is already taken.");
            return section;
        }
        for course in &ctx.analysis.missing_required_courses {
            let _ = writeln!(section, "- {course}");
        }
        section
    }

    fn recommendation_section(ctx: &ReportContext) -> String {
        let mut section = String::new();
        let _ = writeln!(section);
        let _ = writeln!(section, "[Recommended Courses]");

        if ctx.recommendations.is_empty() {
            let _ = writeln!(section, "No open courses to recommend right now.");
            return section;
        }
        for category in ctx.recommendations.categories() {
            let _ = writeln!(section, "{}", category.label);
            for course in &category.courses {
                let _ = writeln!(section, "{}", course_line(course));
            }
            let _ = writeln!(section);
        }
        section
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_report(ctx))
    }
}
