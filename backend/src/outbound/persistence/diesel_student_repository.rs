//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `students_email_key` unique index, so
//! a racing duplicate surfaces as [`StudentRepositoryError::DuplicateEmail`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{
    Email, SearchTerm, Student, StudentDraft, StudentId, StudentValidationError,
};

use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StudentRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors, reporting unique violations against `email`.
fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> StudentRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StudentRepositoryError::duplicate_email(email.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StudentRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => StudentRepositoryError::query("database query error"),
        _ => StudentRepositoryError::query("database error"),
    }
}

fn query_error(error: diesel::result::Error) -> StudentRepositoryError {
    map_diesel_error(error, None)
}

/// Escape `%`, `_` and `\` so user text matches literally in `ILIKE`.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    let StudentRow {
        id,
        name,
        email,
        course,
        profile_image_url,
        created_at,
        updated_at,
    } = row;
    let invalid = |err: StudentValidationError| {
        StudentRepositoryError::query(format!("stored student {id} is invalid: {err}"))
    };
    let draft =
        StudentDraft::try_from_strings(name, email, course, profile_image_url).map_err(invalid)?;
    Student::restore(StudentId::from_uuid(id), draft, created_at, updated_at).map_err(invalid)
}

fn rows_to_students(rows: Vec<StudentRow>) -> Result<Vec<Student>, StudentRepositoryError> {
    rows.into_iter().map(row_to_student).collect()
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn insert(
        &self,
        draft: StudentDraft,
        now: DateTime<Utc>,
    ) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewStudentRow {
            id: Uuid::new_v4(),
            name: draft.name.as_ref(),
            email: draft.email.as_ref(),
            course: draft.course.as_ref(),
            profile_image_url: draft.profile_image_url.as_ref().map(|url| url.as_ref()),
            created_at: now,
            updated_at: now,
        };

        let row = diesel::insert_into(students::table)
            .values(&new_row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(draft.email.as_ref())))?;

        row_to_student(row)
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .find(*id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;

        row.map(row_to_student).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = students::table
            .select(StudentRow::as_select())
            .order((students::created_at.asc(), students::id.asc()))
            .load(&mut conn)
            .await
            .map_err(query_error)?;

        rows_to_students(rows)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .filter(students::email.eq(email.as_ref()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error)?;

        row.map(row_to_student).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            students::table.filter(students::email.eq(email.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(query_error)
    }

    async fn replace(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = StudentChangeset {
            name: student.name().as_ref(),
            email: student.email().as_ref(),
            course: student.course().as_ref(),
            profile_image_url: student.profile_image_url().map(|url| url.as_ref()),
            updated_at: student.updated_at(),
        };

        let updated = diesel::update(students::table.find(*student.id().as_uuid()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(student.email().as_ref())))?;

        if updated == 0 {
            return Err(StudentRepositoryError::missing(student.id().to_string()));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(students::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(query_error)?;

        Ok(deleted > 0)
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Student>, StudentRepositoryError> {
        if term.is_empty() {
            return self.find_all().await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = contains_pattern(term.as_str());

        let rows = students::table
            .filter(
                students::name
                    .ilike(pattern.as_str())
                    .or(students::email.ilike(pattern.as_str()))
                    .or(students::course.ilike(pattern.as_str())),
            )
            .select(StudentRow::as_select())
            .order((students::created_at.asc(), students::id.asc()))
            .load(&mut conn)
            .await
            .map_err(query_error)?;

        rows_to_students(rows)
    }

    async fn find_by_course(&self, course: &str) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // ILIKE without wildcards is a case-insensitive equality check.
        let rows = students::table
            .filter(students::course.ilike(escape_like(course)))
            .select(StudentRow::as_select())
            .order((students::created_at.asc(), students::id.asc()))
            .load(&mut conn)
            .await
            .map_err(query_error)?;

        rows_to_students(rows)
    }
}
