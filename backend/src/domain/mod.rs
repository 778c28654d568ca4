//! Domain primitives, ports and services.
//!
//! Purpose: define the student record model and the use cases around it
//! without depending on HTTP or storage concerns.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Student and its field types: validated record model.
//! - StudentService: implements the command and query ports.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod student;
pub mod student_filter;
pub mod student_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::student::{
    COURSE_MAX, COURSE_MIN, Course, Email, NAME_MAX, NAME_MIN, ProfileImageUrl, Student,
    StudentDraft, StudentId, StudentName, StudentValidationError,
};
pub use self::student_filter::{SearchTerm, matches_course, matches_search_term};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use student_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("student not found"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
