//! Ingest command handler
//!
//! Loads a course catalog text export into the SQLite database so the
//! advise command can draw recommendations from a current lecture list.

use grad_advisor::config::Config;
use grad_advisor::core::ingest::parse_catalog_file;
use grad_advisor::core::store::SqliteStore;
use grad_advisor::{debug, error, info};
use std::path::Path;

/// Run the ingest command.
///
/// # Arguments
/// * `input_file` - Path to the catalog text file
/// * `config` - Configuration containing the database path
pub fn run(input_file: &Path, config: &Config) {
    if let Err(err) = ingest_catalog(input_file, config) {
        error!("Catalog ingest failed for {}: {err}", input_file.display());
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn ingest_catalog(input_file: &Path, config: &Config) -> Result<(), String> {
    let outcome = parse_catalog_file(input_file).map_err(|e| {
        error!("Failed to read catalog {}: {e}", input_file.display());
        format!("✗ Failed to read {}: {e}", input_file.display())
    })?;

    info!(
        "Catalog parsed: {} course rows from {}",
        outcome.records.len(),
        input_file.display()
    );
    if outcome.skipped_lines > 0 {
        debug!(
            "Skipped {} lines that did not match the course grammar",
            outcome.skipped_lines
        );
    }

    let db_path = Path::new(&config.database.path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "✗ Failed to create database directory {}: {e}",
                parent.display()
            )
        })?;
    }

    let store = SqliteStore::open(db_path)
        .map_err(|e| format!("✗ Failed to open database {}: {e}", db_path.display()))?;
    let summary = store
        .upsert_courses(&outcome.records)
        .map_err(|e| format!("✗ Failed to store catalog rows: {e}"))?;

    println!(
        "✓ Catalog loaded: {} new, {} updated ({} cancelled, {} lines skipped)",
        summary.inserted,
        summary.updated,
        outcome.cancelled_count(),
        outcome.skipped_lines
    );
    info!("Catalog stored in: {}", db_path.display());

    Ok(())
}
