//! SQLite-backed store
//!
//! File-backed in normal operation, in-memory for tests. The schema is
//! created on open, so a fresh database path is immediately usable.

use std::path::Path;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::{StoreError, StudentStore};
use crate::core::ingest::CourseRecord;
use crate::core::models::course::normalize_name;
use crate::core::models::enrollment::EXCLUDED_GRADES;
use crate::core::models::{Course, Enrollment, Student};

/// Counts from one catalog upsert batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    /// Records inserted for the first time
    pub inserted: usize,
    /// Records that replaced an existing lecture number
    pub updated: usize,
}

/// SQLite-backed implementation of [`StudentStore`]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    ///
    /// # Errors
    /// Returns [`StoreError`] when the database cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory store, mainly for tests
    ///
    /// # Errors
    /// Returns [`StoreError`] when the schema cannot be created.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                lecture_number TEXT NOT NULL UNIQUE,
                course_name TEXT NOT NULL,
                course_code TEXT NOT NULL,
                class_number TEXT,
                department TEXT,
                process_type TEXT,
                is_cancelled INTEGER NOT NULL DEFAULT 0,
                credits REAL,
                course_classification TEXT
            );
            CREATE TABLE IF NOT EXISTS students (
                student_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                department TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS enrollments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id TEXT NOT NULL,
                course_name TEXT NOT NULL,
                credits REAL,
                grade TEXT,
                classification TEXT,
                FOREIGN KEY (student_id) REFERENCES students (student_id)
            );",
        )?;
        Ok(Self { conn })
    }

    /// Insert or update catalog rows keyed by lecture number
    ///
    /// Updates only touch the columns ingestion knows about; classification
    /// and credits set through [`update_course_details`](Self::update_course_details)
    /// survive a re-ingest.
    ///
    /// # Errors
    /// Returns [`StoreError`] when any statement fails.
    pub fn upsert_courses(&self, records: &[CourseRecord]) -> Result<UpsertSummary, StoreError> {
        let mut summary = UpsertSummary::default();
        for record in records {
            let exists: bool = self.conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE lecture_number = ?1)",
                params![record.lecture_number],
                |row| row.get(0),
            )?;
            self.conn.execute(
                "INSERT INTO courses (lecture_number, course_name, course_code, class_number,
                                      department, process_type, is_cancelled)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(lecture_number) DO UPDATE SET
                     course_name = excluded.course_name,
                     course_code = excluded.course_code,
                     class_number = excluded.class_number,
                     department = excluded.department,
                     process_type = excluded.process_type,
                     is_cancelled = excluded.is_cancelled",
                params![
                    record.lecture_number,
                    record.name,
                    record.code,
                    record.class_number,
                    record.department,
                    record.process_type,
                    record.is_cancelled,
                ],
            )?;
            if exists {
                summary.updated += 1;
            } else {
                summary.inserted += 1;
            }
        }
        Ok(summary)
    }

    /// Set classification and credits on an existing catalog row
    ///
    /// # Returns
    /// `true` when a row with the lecture number existed and was updated.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the statement fails.
    pub fn update_course_details(
        &self,
        lecture_number: &str,
        classification: Option<&str>,
        credits: Option<f32>,
    ) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE courses SET course_classification = ?2, credits = ?3 WHERE lecture_number = ?1",
            params![lecture_number, classification, credits],
        )?;
        Ok(changed > 0)
    }

    /// Insert a student row, replacing any existing row with the same id
    ///
    /// # Errors
    /// Returns [`StoreError`] when the statement fails.
    pub fn insert_student(&self, student: &Student) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO students (student_id, name, department) VALUES (?1, ?2, ?3)",
            params![student.student_id, student.name, student.department],
        )?;
        Ok(())
    }

    /// Append one enrollment row
    ///
    /// # Errors
    /// Returns [`StoreError`] when the statement fails.
    pub fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO enrollments (student_id, course_name, credits, grade, classification)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                enrollment.student_id,
                enrollment.course_name,
                enrollment.credits,
                enrollment.grade,
                enrollment.classification,
            ],
        )?;
        Ok(())
    }
}

impl StudentStore for SqliteStore {
    fn fetch_student(&self, student_id: &str, name: &str) -> Result<Option<Student>, StoreError> {
        let student = self
            .conn
            .query_row(
                "SELECT student_id, name, department FROM students
                 WHERE student_id = ?1 AND name = ?2",
                params![student_id, name],
                |row| {
                    Ok(Student {
                        student_id: row.get(0)?,
                        name: row.get(1)?,
                        department: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(student)
    }

    fn fetch_enrollments(&self, student_id: &str) -> Result<Vec<Enrollment>, StoreError> {
        let placeholders = vec!["?"; EXCLUDED_GRADES.len()].join(", ");
        let sql = format!(
            "SELECT student_id, course_name, credits, COALESCE(grade, ''),
                    COALESCE(classification, '')
             FROM enrollments
             WHERE student_id = ? AND grade NOT IN ({placeholders})
             ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params_from_iter(std::iter::once(student_id).chain(EXCLUDED_GRADES)),
            |row| {
                Ok(Enrollment {
                    student_id: row.get(0)?,
                    course_name: row.get(1)?,
                    credits: row.get(2)?,
                    grade: row.get(3)?,
                    classification: row.get(4)?,
                })
            },
        )?;

        let mut enrollments = Vec::new();
        for row in rows {
            enrollments.push(row?);
        }
        Ok(enrollments)
    }

    fn fetch_available_courses(
        &self,
        excluded_names: &[String],
        departments: Option<&[String]>,
    ) -> Result<Vec<Course>, StoreError> {
        if departments.is_some_and(<[String]>::is_empty) {
            return Ok(Vec::new());
        }

        let mut sql = String::from(
            "SELECT course_code, COALESCE(class_number, ''), lecture_number, course_name,
                    COALESCE(department, ''), course_classification, credits,
                    COALESCE(process_type, ''), is_cancelled
             FROM courses
             WHERE is_cancelled = 0",
        );
        let mut values: Vec<String> = Vec::new();

        if !excluded_names.is_empty() {
            let placeholders = vec!["?"; excluded_names.len()].join(", ");
            sql.push_str(&format!(
                " AND REPLACE(course_name, ' ', '') NOT IN ({placeholders})"
            ));
            values.extend(excluded_names.iter().map(|name| normalize_name(name)));
        }

        if let Some(departments) = departments {
            let placeholders = vec!["?"; departments.len()].join(", ");
            sql.push_str(&format!(" AND department IN ({placeholders})"));
            values.extend(departments.iter().cloned());
        }

        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter().map(String::as_str)), |row| {
            Ok(Course {
                code: row.get(0)?,
                class_number: row.get(1)?,
                lecture_number: row.get(2)?,
                name: row.get(3)?,
                department: row.get(4)?,
                classification: row.get(5)?,
                credits: row.get(6)?,
                process_type: row.get(7)?,
                is_cancelled: row.get(8)?,
            })
        })?;

        let mut courses = Vec::new();
        for row in rows {
            courses.push(row?);
        }
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lecture_number: &str, name: &str, department: &str) -> CourseRecord {
        CourseRecord {
            process_type: "일반".to_string(),
            code: "CSE2010".to_string(),
            class_number: "01".to_string(),
            lecture_number: lecture_number.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            is_cancelled: false,
        }
    }

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::in_memory().expect("in-memory store");
        store
            .insert_student(&Student::new(
                "2021320045".to_string(),
                "김민준".to_string(),
                "컴퓨터공학과".to_string(),
            ))
            .expect("student");
        store
    }

    fn enrollment(course_name: &str, grade: &str, credits: Option<f32>) -> Enrollment {
        Enrollment::new(
            "2021320045".to_string(),
            course_name.to_string(),
            credits,
            grade.to_string(),
            "전필".to_string(),
        )
    }

    #[test]
    fn test_fetch_student_requires_exact_name() {
        let store = seeded_store();

        let found = store
            .fetch_student("2021320045", "김민준")
            .expect("lookup")
            .expect("student exists");
        assert_eq!(found.department, "컴퓨터공학과");

        assert!(store
            .fetch_student("2021320045", "김민")
            .expect("lookup")
            .is_none());
        assert!(store
            .fetch_student("9999999999", "김민준")
            .expect("lookup")
            .is_none());
    }

    #[test]
    fn test_fetch_enrollments_filters_excluded_grades() {
        let store = seeded_store();
        store
            .insert_enrollment(&enrollment("자료구조", "A+", Some(3.0)))
            .expect("insert");
        store
            .insert_enrollment(&enrollment("운영체제", "F", Some(3.0)))
            .expect("insert");
        store
            .insert_enrollment(&enrollment("체육", "P", Some(1.0)))
            .expect("insert");
        store
            .insert_enrollment(&enrollment("교양영어", "NP", Some(2.0)))
            .expect("insert");
        store
            .insert_enrollment(&enrollment("알고리즘", "W", Some(3.0)))
            .expect("insert");

        let enrollments = store.fetch_enrollments("2021320045").expect("fetch");
        let names: Vec<&str> = enrollments.iter().map(|e| e.course_name.as_str()).collect();
        assert_eq!(names, vec!["자료구조", "체육"]);
    }

    #[test]
    fn test_fetch_enrollments_empty_for_unknown_student() {
        let store = seeded_store();
        assert!(store
            .fetch_enrollments("0000000000")
            .expect("fetch")
            .is_empty());
    }

    #[test]
    fn test_upsert_counts_and_updates() {
        let store = seeded_store();

        let summary = store
            .upsert_courses(&[
                record("2024000101", "자료구조", "컴퓨터공학과"),
                record("2024000102", "알고리즘", "컴퓨터공학과"),
            ])
            .expect("upsert");
        assert_eq!(summary, UpsertSummary { inserted: 2, updated: 0 });

        let mut renamed = record("2024000101", "자료구조및실습", "컴퓨터공학과");
        renamed.is_cancelled = true;
        let summary = store.upsert_courses(&[renamed]).expect("upsert");
        assert_eq!(summary, UpsertSummary { inserted: 0, updated: 1 });

        let courses = store
            .fetch_available_courses(&[], None)
            .expect("fetch");
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["알고리즘"]);
    }

    #[test]
    fn test_course_details_survive_reingest() {
        let store = seeded_store();
        store
            .upsert_courses(&[record("2024000101", "자료구조", "컴퓨터공학과")])
            .expect("upsert");
        assert!(store
            .update_course_details("2024000101", Some("전필"), Some(3.0))
            .expect("update"));

        store
            .upsert_courses(&[record("2024000101", "자료구조", "컴퓨터공학과")])
            .expect("re-upsert");

        let courses = store.fetch_available_courses(&[], None).expect("fetch");
        assert_eq!(courses[0].classification.as_deref(), Some("전필"));
        assert_eq!(courses[0].credits, Some(3.0));
    }

    #[test]
    fn test_update_course_details_unknown_lecture_number() {
        let store = seeded_store();
        assert!(!store
            .update_course_details("0000000000", Some("전필"), Some(3.0))
            .expect("update"));
    }

    #[test]
    fn test_fetch_available_courses_excludes_names_whitespace_insensitively() {
        let store = seeded_store();
        store
            .upsert_courses(&[
                record("2024000101", "자료 구조", "컴퓨터공학과"),
                record("2024000102", "알고리즘", "컴퓨터공학과"),
            ])
            .expect("upsert");

        let courses = store
            .fetch_available_courses(&["자료구조".to_string()], None)
            .expect("fetch");
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["알고리즘"]);
    }

    #[test]
    fn test_fetch_available_courses_department_restriction() {
        let store = seeded_store();
        store
            .upsert_courses(&[
                record("2024000101", "자료구조", "컴퓨터공학과"),
                record("2024000201", "회로이론", "전자공학과"),
                record("2024000301", "문학의 이해", "교양학부"),
            ])
            .expect("upsert");

        let courses = store
            .fetch_available_courses(&[], Some(&["컴퓨터공학과".to_string()]))
            .expect("fetch");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "자료구조");

        let all = store.fetch_available_courses(&[], None).expect("fetch");
        assert_eq!(all.len(), 3);

        let none = store
            .fetch_available_courses(&[], Some(&[]))
            .expect("fetch");
        assert!(none.is_empty());
    }
}
