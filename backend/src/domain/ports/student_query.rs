//! Driving port for student reads.

use async_trait::async_trait;

use crate::domain::{Error, SearchTerm, Student, StudentId};

/// Domain use-case port for reading student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    /// Fetch one student, or not found.
    async fn get(&self, id: &StudentId) -> Result<Student, Error>;

    /// Every student in insertion order.
    async fn list(&self) -> Result<Vec<Student>, Error>;

    /// Students whose name, email or course contains the term.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Student>, Error>;

    /// Students enrolled in `course`, ignoring case.
    async fn list_by_course(&self, course: &str) -> Result<Vec<Student>, Error>;
}
