//! Student record model.
//!
//! Field newtypes validate on construction so a [`Student`] or
//! [`StudentDraft`] can only hold values that satisfy the record invariants.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

/// Minimum allowed length for a student name.
pub const NAME_MIN: usize = 2;
/// Maximum allowed length for a student name.
pub const NAME_MAX: usize = 100;
/// Minimum allowed length for a course name.
pub const COURSE_MIN: usize = 2;
/// Maximum allowed length for a course name.
pub const COURSE_MAX: usize = 50;

/// Validation errors returned by the student field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    InvalidId,
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    EmptyEmail,
    InvalidEmail,
    EmptyCourse,
    CourseTooShort { min: usize },
    CourseTooLong { max: usize },
    UpdatedBeforeCreated,
}

impl StudentValidationError {
    /// Inbound field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooShort { .. } | Self::NameTooLong { .. } => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyCourse | Self::CourseTooShort { .. } | Self::CourseTooLong { .. } => {
                "course"
            }
            Self::UpdatedBeforeCreated => "updatedAt",
        }
    }
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "student id must be a valid UUID"),
            Self::EmptyName => write!(f, "name is required"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email is required"),
            Self::InvalidEmail => write!(f, "email should be valid"),
            Self::EmptyCourse => write!(f, "course is required"),
            Self::CourseTooShort { min } => {
                write!(f, "course must be at least {min} characters")
            }
            Self::CourseTooLong { max } => write!(f, "course must be at most {max} characters"),
            Self::UpdatedBeforeCreated => {
                write!(f, "updated timestamp must not precede the creation timestamp")
            }
        }
    }
}

impl std::error::Error for StudentValidationError {}

/// Store-assigned student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Parse an identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(StudentValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StudentValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = StudentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn check_length(
    value: &str,
    min: usize,
    max: usize,
    empty: StudentValidationError,
    too_short: StudentValidationError,
    too_long: StudentValidationError,
) -> Result<(), StudentValidationError> {
    if value.trim().is_empty() {
        return Err(empty);
    }
    let length = value.chars().count();
    if length < min {
        return Err(too_short);
    }
    if length > max {
        return Err(too_long);
    }
    Ok(())
}

macro_rules! text_accessors {
    ($ty:ident) => {
        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

/// Student full name, 2 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentName(String);

impl StudentName {
    /// Validate and construct a name.
    pub fn new(name: impl Into<String>) -> Result<Self, StudentValidationError> {
        let name = name.into();
        check_length(
            &name,
            NAME_MIN,
            NAME_MAX,
            StudentValidationError::EmptyName,
            StudentValidationError::NameTooShort { min: NAME_MIN },
            StudentValidationError::NameTooLong { max: NAME_MAX },
        )?;
        Ok(Self(name))
    }
}

text_accessors!(StudentName);

/// Syntactically valid email address.
///
/// Comparison is exact; uniqueness checks treat `Ada@x.io` and `ada@x.io` as
/// different addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@",
            r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate and construct an email address.
    ///
    /// # Examples
    /// ```
    /// use student_registry::domain::Email;
    ///
    /// assert!(Email::new("ada@example.com").is_ok());
    /// assert!(Email::new("ada.example.com").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, StudentValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(StudentValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(StudentValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

text_accessors!(Email);

/// Course name, 2 to 50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course(String);

impl Course {
    /// Validate and construct a course name.
    pub fn new(course: impl Into<String>) -> Result<Self, StudentValidationError> {
        let course = course.into();
        check_length(
            &course,
            COURSE_MIN,
            COURSE_MAX,
            StudentValidationError::EmptyCourse,
            StudentValidationError::CourseTooShort { min: COURSE_MIN },
            StudentValidationError::CourseTooLong { max: COURSE_MAX },
        )?;
        Ok(Self(course))
    }
}

text_accessors!(Course);

/// Optional profile picture location. No format is enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImageUrl(String);

impl ProfileImageUrl {
    /// Wrap a URL, treating blank input as absent.
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            None
        } else {
            Some(Self(url))
        }
    }
}

text_accessors!(ProfileImageUrl);

/// Validated inbound payload for creating or replacing a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: StudentName,
    pub email: Email,
    pub course: Course,
    pub profile_image_url: Option<ProfileImageUrl>,
}

impl StudentDraft {
    /// Validate raw strings into a draft.
    ///
    /// # Examples
    /// ```
    /// use student_registry::domain::StudentDraft;
    ///
    /// let draft = StudentDraft::try_from_strings("Ada Lovelace", "ada@example.com", "Mathematics", None)
    ///     .expect("valid draft");
    /// assert_eq!(draft.email.as_ref(), "ada@example.com");
    /// ```
    pub fn try_from_strings(
        name: impl Into<String>,
        email: impl Into<String>,
        course: impl Into<String>,
        profile_image_url: Option<String>,
    ) -> Result<Self, StudentValidationError> {
        Ok(Self {
            name: StudentName::new(name)?,
            email: Email::new(email)?,
            course: Course::new(course)?,
            profile_image_url: profile_image_url.and_then(ProfileImageUrl::new),
        })
    }
}

/// Persisted student record.
///
/// ## Invariants
/// - `updated_at >= created_at`.
/// - `id` and `created_at` never change once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: StudentName,
    email: Email,
    course: Course,
    profile_image_url: Option<ProfileImageUrl>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Student {
    /// Build a freshly created record with equal timestamps.
    pub fn create(id: StudentId, draft: StudentDraft, now: DateTime<Utc>) -> Self {
        let StudentDraft {
            name,
            email,
            course,
            profile_image_url,
        } = draft;
        Self {
            id,
            name,
            email,
            course,
            profile_image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a stored record, checking timestamp ordering.
    pub fn restore(
        id: StudentId,
        draft: StudentDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, StudentValidationError> {
        if updated_at < created_at {
            return Err(StudentValidationError::UpdatedBeforeCreated);
        }
        let mut student = Self::create(id, draft, created_at);
        student.updated_at = updated_at;
        Ok(student)
    }

    /// Produce a new record with every mutable field replaced by `draft`.
    ///
    /// `updated_at` becomes `now`, clamped so it never moves backwards.
    #[must_use]
    pub fn revise(&self, draft: StudentDraft, now: DateTime<Utc>) -> Self {
        let mut revised = Self::create(self.id, draft, self.created_at);
        revised.updated_at = now.max(self.updated_at);
        revised
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Full name.
    pub fn name(&self) -> &StudentName {
        &self.name
    }

    /// Unique email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Enrolled course.
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Optional profile picture location.
    pub fn profile_image_url(&self) -> Option<&ProfileImageUrl> {
        self.profile_image_url.as_ref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests;
