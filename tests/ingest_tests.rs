//! Catalog ingestion pipeline tests
//!
//! Parse the bundled sample catalog and load it into a file-backed store,
//! checking parse accounting, upsert counts, and the retrieval filters the
//! recommender depends on.

use grad_advisor::core::ingest::{parse_catalog_file, IngestError, ParseOutcome};
use grad_advisor::core::store::{SqliteStore, StudentStore, UpsertSummary};
use tempfile::TempDir;

fn parse_sample() -> ParseOutcome {
    parse_catalog_file("samples/catalog.txt").expect("sample catalog parses")
}

fn open_store(dir: &TempDir) -> SqliteStore {
    SqliteStore::open(&dir.path().join("advisor.db")).expect("open store")
}

#[test]
fn test_parse_sample_catalog() {
    let outcome = parse_sample();

    // Two header lines and one footer line carry no course records
    assert_eq!(outcome.records.len(), 18);
    assert_eq!(outcome.skipped_lines, 3);
    assert_eq!(outcome.cancelled_count(), 1);

    let first = &outcome.records[0];
    assert_eq!(first.process_type, "일반");
    assert_eq!(first.code, "CSE201");
    assert_eq!(first.class_number, "001");
    assert_eq!(first.lecture_number, "2026100101");
    assert_eq!(first.name, "자료구조");
    assert_eq!(first.department, "컴퓨터공학과");
    assert!(!first.is_cancelled);

    let by_number = |lecture_number: &str| {
        outcome
            .records
            .iter()
            .find(|r| r.lecture_number == lecture_number)
            .unwrap_or_else(|| panic!("record {lecture_number}"))
    };

    let cancelled = by_number("2026100501");
    assert_eq!(cancelled.name, "컴파일러");
    assert!(cancelled.is_cancelled);

    let spaced = by_number("2026300101");
    assert_eq!(spaced.name, "교육 방법 및 공학");
    assert_eq!(spaced.process_type, "교직");
    assert_eq!(spaced.department, "교육학과");

    assert_eq!(by_number("2026100601").process_type, "학석사통합");
    assert_eq!(by_number("2026500101").process_type, "계약(DSC)");
}

#[test]
fn test_catalog_survives_reingest() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let outcome = parse_sample();

    let summary = store.upsert_courses(&outcome.records).expect("first load");
    assert_eq!(
        summary,
        UpsertSummary {
            inserted: 18,
            updated: 0
        }
    );

    // Enrichment lands between two catalog releases
    assert!(store
        .update_course_details("2026100301", Some("전필"), Some(3.0))
        .expect("update details"));

    let summary = store.upsert_courses(&outcome.records).expect("reload");
    assert_eq!(
        summary,
        UpsertSummary {
            inserted: 0,
            updated: 18
        }
    );

    let courses = store.fetch_available_courses(&[], None).expect("fetch");
    assert_eq!(courses.len(), 17);
    assert!(courses.iter().all(|c| c.name != "컴파일러"));

    let enriched = courses
        .iter()
        .find(|c| c.lecture_number == "2026100301")
        .expect("enriched course");
    assert_eq!(enriched.classification.as_deref(), Some("전필"));
    assert_eq!(enriched.credits, Some(3.0));
}

#[test]
fn test_available_courses_respect_name_exclusions() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    store
        .upsert_courses(&parse_sample().records)
        .expect("load catalog");

    // The compact transcript spelling must exclude the spaced catalog name
    let courses = store
        .fetch_available_courses(&["교육방법및공학".to_string()], None)
        .expect("fetch");
    assert_eq!(courses.len(), 16);
    assert!(courses.iter().all(|c| c.name != "교육 방법 및 공학"));
}

#[test]
fn test_available_courses_department_filter() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    store
        .upsert_courses(&parse_sample().records)
        .expect("load catalog");

    let courses = store
        .fetch_available_courses(&[], Some(&["컴퓨터공학과".to_string()]))
        .expect("fetch");
    assert_eq!(courses.len(), 6);
    assert!(courses.iter().all(|c| c.department == "컴퓨터공학과"));

    let none = store
        .fetch_available_courses(&[], Some(&[]))
        .expect("fetch");
    assert!(none.is_empty());
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let result = parse_catalog_file("samples/no-such-catalog.txt");
    assert!(matches!(result, Err(IngestError::Io(_))));
}
