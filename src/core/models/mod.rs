//! Data models for `GradAdvisor`

pub mod catalog;
pub mod course;
pub mod enrollment;
pub mod student;

pub use catalog::Catalog;
pub use course::Course;
pub use enrollment::Enrollment;
pub use student::Student;
