//! Student records HTTP handlers.
//!
//! ```text
//! POST   /api/students
//! GET    /api/students
//! GET    /api/students/search?query=eng
//! GET    /api/students/course/{course}
//! GET    /api/students/{id}
//! PUT    /api/students/{id}
//! DELETE /api/students/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Course, Email, Error, ErrorCode, ProfileImageUrl, SearchTerm, Student, StudentDraft, StudentId,
    StudentName,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, malformed_body_error, missing_field_error, missing_query_error,
    student_field_error,
};

const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");
const COURSE: FieldName = FieldName::new("course");
const QUERY: FieldName = FieldName::new("query");

/// Inbound payload for creating or replacing a student.
///
/// Server-assigned fields (`id`, timestamps) are ignored if supplied.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Mathematics")]
    pub course: Option<String>,
    #[schema(example = "https://img.example/ada.png")]
    pub profile_image_url: Option<String>,
}

impl TryFrom<StudentRequest> for StudentDraft {
    type Error = Error;

    fn try_from(value: StudentRequest) -> Result<Self, Self::Error> {
        let name = value.name.ok_or_else(|| missing_field_error(NAME))?;
        let email = value.email.ok_or_else(|| missing_field_error(EMAIL))?;
        let course = value.course.ok_or_else(|| missing_field_error(COURSE))?;

        Ok(Self {
            name: StudentName::new(name).map_err(student_field_error)?,
            email: Email::new(email).map_err(student_field_error)?,
            course: Course::new(course).map_err(student_field_error)?,
            profile_image_url: value.profile_image_url.and_then(ProfileImageUrl::new),
        })
    }
}

/// Outbound representation of a stored student.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub profile_image_url: Option<String>,
    #[schema(example = "2024-03-01T12:00:00+00:00")]
    pub created_at: String,
    #[schema(example = "2024-03-01T12:00:00+00:00")]
    pub updated_at: String,
}

impl From<Student> for StudentResponse {
    fn from(value: Student) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            email: value.email().to_string(),
            course: value.course().to_string(),
            profile_image_url: value.profile_image_url().map(ToString::to_string),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

fn to_responses(students: Vec<Student>) -> Vec<StudentResponse> {
    students.into_iter().map(StudentResponse::from).collect()
}

/// Query string for free-text search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring matched against name, email and course.
    pub query: Option<String>,
}

// An id that cannot be parsed cannot name a stored record.
fn parse_student_id(raw: &str) -> Result<StudentId, Error> {
    StudentId::new(raw).map_err(|_| Error::not_found(format!("student {raw} not found")))
}

// Registration reports a taken email as a rejected request; the details
// still carry `duplicate_email`.
fn registration_error(error: Error) -> Error {
    if error.code() != ErrorCode::Conflict {
        return error;
    }
    let rejected = Error::invalid_request(error.message());
    match error.details() {
        Some(details) => rejected.with_details(details.clone()),
        None => rejected,
    }
}

/// JSON extractor configuration reporting malformed bodies as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| actix_web::Error::from(malformed_body_error(err)))
}

/// Register every student route on `cfg`.
///
/// Literal paths are registered before `/students/{id}` so they are not
/// captured as identifiers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_student)
        .service(list_students)
        .service(search_students)
        .service(list_students_by_course)
        .service(get_student)
        .service(update_student)
        .service(delete_student);
}

/// Register a new student.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation failed or email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = StudentDraft::try_from(payload.into_inner())?;
    let student = state
        .students
        .create(draft)
        .await
        .map_err(registration_error)?;
    Ok(HttpResponse::Created().json(StudentResponse::from(student)))
}

/// List every student.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students", body = [StudentResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let students = state.students_query.list().await?;
    Ok(web::Json(to_responses(students)))
}

/// Search students by name, email or course.
#[utoipa::path(
    get,
    path = "/api/students/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching students", body = [StudentResponse]),
        (status = 400, description = "Missing query parameter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "searchStudents"
)]
#[get("/students/search")]
pub async fn search_students(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let query = params
        .into_inner()
        .query
        .ok_or_else(|| missing_query_error(QUERY))?;
    let students = state.students_query.search(&SearchTerm::new(query)).await?;
    Ok(web::Json(to_responses(students)))
}

/// List students enrolled in a course, ignoring case.
#[utoipa::path(
    get,
    path = "/api/students/course/{course}",
    params(("course" = String, Path, description = "Course name")),
    responses(
        (status = 200, description = "Students on the course", body = [StudentResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudentsByCourse"
)]
#[get("/students/course/{course}")]
pub async fn list_students_by_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let course = path.into_inner();
    let students = state.students_query.list_by_course(&course).await?;
    Ok(web::Json(to_responses(students)))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id = parse_student_id(&path.into_inner())?;
    let student = state.students_query.get(&id).await?;
    Ok(web::Json(StudentResponse::from(student)))
}

/// Replace a student's name, email, course and image URL.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id = parse_student_id(&path.into_inner())?;
    let draft = StudentDraft::try_from(payload.into_inner())?;
    let student = state.students.update(&id, draft).await?;
    Ok(web::Json(StudentResponse::from(student)))
}

/// Remove a student.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_student_id(&path.into_inner())?;
    state.students.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
