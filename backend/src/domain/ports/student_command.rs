//! Driving port for student mutations.
//!
//! HTTP handlers call [`StudentCommand`] to create, replace and remove
//! records without touching persistence adapters.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentDraft, StudentId};

/// Domain use-case port for changing student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentCommand: Send + Sync {
    /// Register a new student.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the email is already registered.
    async fn create(&self, draft: StudentDraft) -> Result<Student, Error>;

    /// Replace every mutable field of an existing student.
    ///
    /// # Errors
    ///
    /// Returns not found for an unknown id and a conflict when the new email
    /// belongs to another student.
    async fn update(&self, id: &StudentId, draft: StudentDraft) -> Result<Student, Error>;

    /// Remove a student.
    ///
    /// # Errors
    ///
    /// Returns not found for an unknown id.
    async fn delete(&self, id: &StudentId) -> Result<(), Error>;
}
