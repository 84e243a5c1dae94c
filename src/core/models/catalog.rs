//! Course catalog container

use std::collections::HashMap;

use super::course::{normalize_name, Course};

/// An in-memory collection of catalog courses keyed by lecture number
///
/// Serves as the candidate pool during recommendation: insertion deduplicates
/// by `lecture_number` while preserving catalog order, so selection over the
/// pool is deterministic. Name lookups use the whitespace-stripped form.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Courses in insertion order
    courses: Vec<Course>,

    /// Lecture number to position in `courses`
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from courses, deduplicating by lecture number
    ///
    /// The first occurrence of each lecture number wins.
    #[must_use]
    pub fn from_courses<I>(courses: I) -> Self
    where
        I: IntoIterator<Item = Course>,
    {
        let mut catalog = Self::new();
        for course in courses {
            catalog.add_course(course);
        }
        catalog
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// `true` if the course was added, `false` if its lecture number was
    /// already present (the existing entry is kept)
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.index.contains_key(&course.lecture_number) {
            return false;
        }
        self.index
            .insert(course.lecture_number.clone(), self.courses.len());
        self.courses.push(course);
        true
    }

    /// Look up a course by lecture number
    #[must_use]
    pub fn get_course(&self, lecture_number: &str) -> Option<&Course> {
        self.index
            .get(lecture_number)
            .and_then(|&pos| self.courses.get(pos))
    }

    /// All courses, in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// First course whose whitespace-stripped name equals `normalized`
    #[must_use]
    pub fn find_by_normalized_name(&self, normalized: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|course| normalize_name(&course.name) == normalized)
    }

    /// Number of courses in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog holds no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
