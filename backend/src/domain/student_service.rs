//! Student registry domain service.
//!
//! Implements the [`StudentCommand`] and [`StudentQuery`] driving ports over
//! any [`StudentRepository`]. Email uniqueness is checked up front so callers
//! get a clean conflict; the repository still enforces it on write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    StudentCommand, StudentQuery, StudentRepository, StudentRepositoryError,
};
use crate::domain::{Error, SearchTerm, Student, StudentDraft, StudentId};

/// Student service implementing the driving ports.
#[derive(Clone)]
pub struct StudentService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> StudentService<R> {
    /// Create a new service over `repository`, stamping records with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn student_not_found(id: &StudentId) -> Error {
    Error::not_found(format!("student {id} not found"))
}

fn email_taken(email: &str) -> Error {
    Error::conflict(format!("email {email} is already registered"))
        .with_details(serde_json::json!({ "field": "email", "code": "duplicate_email" }))
}

fn map_repository_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            error!(%message, "student repository unavailable");
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            error!(%message, "student repository query failed");
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { email } => email_taken(&email),
        StudentRepositoryError::Missing { id } => {
            Error::not_found(format!("student {id} not found"))
        }
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository,
{
    async fn require(&self, id: &StudentId) -> Result<Student, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| student_not_found(id))
    }
}

#[async_trait]
impl<R> StudentCommand for StudentService<R>
where
    R: StudentRepository,
{
    async fn create(&self, draft: StudentDraft) -> Result<Student, Error> {
        let taken = self
            .repository
            .exists_by_email(&draft.email)
            .await
            .map_err(map_repository_error)?;
        if taken {
            warn!(email = %draft.email, "rejected student with duplicate email");
            return Err(email_taken(draft.email.as_ref()));
        }

        let student = self
            .repository
            .insert(draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(student_id = %student.id(), "student created");
        Ok(student)
    }

    async fn update(&self, id: &StudentId, draft: StudentDraft) -> Result<Student, Error> {
        let existing = self.require(id).await?;

        if existing.email() != &draft.email {
            let owner = self
                .repository
                .find_by_email(&draft.email)
                .await
                .map_err(map_repository_error)?;
            if owner.is_some_and(|other| other.id() != id) {
                warn!(student_id = %id, email = %draft.email, "rejected update to an email in use");
                return Err(email_taken(draft.email.as_ref()));
            }
        }

        let revised = existing.revise(draft, self.clock.utc());
        self.repository
            .replace(&revised)
            .await
            .map_err(map_repository_error)?;
        info!(student_id = %id, "student updated");
        Ok(revised)
    }

    async fn delete(&self, id: &StudentId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(student_not_found(id));
        }
        info!(student_id = %id, "student deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> StudentQuery for StudentService<R>
where
    R: StudentRepository,
{
    async fn get(&self, id: &StudentId) -> Result<Student, Error> {
        self.require(id).await
    }

    async fn list(&self) -> Result<Vec<Student>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Student>, Error> {
        self.repository
            .search(term)
            .await
            .map_err(map_repository_error)
    }

    async fn list_by_course(&self, course: &str) -> Result<Vec<Student>, Error> {
        self.repository
            .find_by_course(course)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
