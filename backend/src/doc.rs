//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the student and health endpoints plus the schema
//! wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves it in
//! debug builds and `openapi-dump` prints it for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::students::{StudentRequest, StudentResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student registry API",
        description = "CRUD, search and course filtering for student records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::search_students,
        crate::inbound::http::students::list_students_by_course,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(StudentRequest, StudentResponse, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "students", description = "Student record management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
