//! Driven port for student record storage.
//!
//! Adapters must reject a second record with an already stored email
//! atomically with the write, so concurrent creates cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, SearchTerm, Student, StudentDraft, StudentId};

/// Persistence errors raised by student repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentRepositoryError {
    /// Repository connection could not be established.
    #[error("student repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("student repository query failed: {message}")]
    Query { message: String },
    /// Another record already holds the email.
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
    /// The record to replace no longer exists.
    #[error("student {id} does not exist")]
    Missing { id: String },
}

impl StudentRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    pub fn missing(id: impl Into<String>) -> Self {
        Self::Missing { id: id.into() }
    }
}

/// Storage contract for student records.
///
/// Listing methods return records in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Store a new record, assigning a fresh identifier.
    ///
    /// `created_at` and `updated_at` are both set to `now`.
    async fn insert(
        &self,
        draft: StudentDraft,
        now: DateTime<Utc>,
    ) -> Result<Student, StudentRepositoryError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Fetch every record.
    async fn find_all(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Fetch the record holding `email`, compared exactly.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Whether any record holds `email`.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, StudentRepositoryError>;

    /// Overwrite an existing record with the same identifier.
    async fn replace(&self, student: &Student) -> Result<(), StudentRepositoryError>;

    /// Remove a record. Returns `false` when nothing was stored under `id`.
    async fn delete_by_id(&self, id: &StudentId) -> Result<bool, StudentRepositoryError>;

    /// Records whose name, email or course contains `term`, ignoring case.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Records whose course equals `course`, ignoring case.
    async fn find_by_course(&self, course: &str) -> Result<Vec<Student>, StudentRepositoryError>;
}
