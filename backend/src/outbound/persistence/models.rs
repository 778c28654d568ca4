//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::students;

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub course: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub course: &'a str,
    pub profile_image_url: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset replacing every mutable column of a student.
///
/// `profile_image_url` is written even when `None` so a cleared URL is
/// persisted as `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StudentChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub course: &'a str,
    pub profile_image_url: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
