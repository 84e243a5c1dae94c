//! Advise command handler
//!
//! Evaluates a student's transcript against their department's graduation
//! requirements and renders the progress report with course recommendations.

use grad_advisor::config::Config;
use grad_advisor::core::{
    evaluator::analyze_graduation_progress,
    recommender::suggest_courses,
    report::{MarkdownReporter, ReportContext, ReportFormat, ReportGenerator, TextReporter},
    requirements::RequirementsTable,
    store::{SqliteStore, StudentStore},
};
use grad_advisor::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the advise command.
///
/// # Arguments
/// * `student_id` - Student identifier as stored in the database
/// * `name` - Student name, must match the stored record
/// * `format_str` - Report format (text, markdown)
/// * `output` - Optional output path; stdout when omitted
/// * `save` - Save under the configured reports directory instead
/// * `config` - Configuration containing the database and requirements paths
pub fn run(
    student_id: &str,
    name: &str,
    format_str: &str,
    output: Option<&Path>,
    save: bool,
    config: &Config,
) {
    if let Err(err) = advise(student_id, name, format_str, output, save, config) {
        error!("Advising failed for student {student_id}: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn advise(
    student_id: &str,
    name: &str,
    format_str: &str,
    output: Option<&Path>,
    save: bool,
    config: &Config,
) -> Result<(), String> {
    // Parse the format
    let format =
        ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}. Use: text or markdown"))?;

    let requirements_path = Path::new(&config.paths.requirements_file);
    let table = RequirementsTable::from_toml_file(requirements_path).map_err(|e| {
        error!(
            "Failed to load requirements {}: {e}",
            requirements_path.display()
        );
        format!(
            "✗ Failed to load requirements {}: {e}",
            requirements_path.display()
        )
    })?;

    let db_path = Path::new(&config.database.path);
    let store = SqliteStore::open(db_path)
        .map_err(|e| format!("✗ Failed to open database {}: {e}", db_path.display()))?;

    // Both id and name must match the stored record
    let student = store
        .fetch_student(student_id, name)
        .map_err(|e| format!("✗ Failed to look up student: {e}"))?
        .ok_or_else(|| format!("✗ No student found matching id {student_id} and name {name}"))?;

    info!(
        "Advising {} ({}) in {}",
        student.name, student.student_id, student.department
    );

    let analysis = analyze_graduation_progress(&student, &store, &table)
        .map_err(|e| format!("✗ Failed to analyze graduation progress: {e}"))?;
    let recommendations = suggest_courses(&student, &analysis, &store, &table)
        .map_err(|e| format!("✗ Failed to build recommendations: {e}"))?;

    let ctx = ReportContext::new(&student, &analysis, &recommendations);
    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    };

    // Explicit path first, then the configured reports directory with --save
    let output_path: Option<PathBuf> = match output {
        Some(path) => Some(path.to_path_buf()),
        None if save => Some(default_report_path(student_id, format, config)?),
        None => None,
    };

    if let Some(output_path) = output_path {
        reporter
            .generate(&ctx, &output_path)
            .map_err(|e| format!("✗ Failed to write report: {e}"))?;
        println!("✓ Report generated: {}", output_path.display());
        info!("Report exported to: {}", output_path.display());

        println!("\n=== Summary ===");
        println!("Student: {} ({})", student.name, student.student_id);
        println!(
            "Credits: {} of {} completed ({} remaining)",
            analysis.summary.total_completed,
            analysis.summary.total_required,
            analysis.summary.total_missing
        );
        println!("Recommended courses: {}", recommendations.total_count());
    } else {
        let report = reporter
            .render(&ctx)
            .map_err(|e| format!("✗ Failed to render report: {e}"))?;
        println!("{report}");
    }

    Ok(())
}

/// Build the default report path under the configured reports directory
fn default_report_path(
    student_id: &str,
    format: ReportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;
    Ok(reports_dir.join(format!("{student_id}_report.{}", format.extension())))
}
