//! Shared validation helpers for inbound HTTP adapters.
//!
//! Validation failures become `invalid_request` errors whose details name the
//! offending field and a machine-readable code.

use serde_json::json;

use crate::domain::{Error, StudentValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    TooShort,
    TooLong,
    InvalidEmail,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidEmail => "invalid_email",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: &str, message: impl Into<String>, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        format!("missing required field: {field}"),
        ValidationCode::MissingField,
    )
}

pub(crate) fn missing_query_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        format!("missing required query parameter: {field}"),
        ValidationCode::MissingField,
    )
}

pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request("request body is not valid JSON").with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
        "reason": reason.to_string(),
    }))
}

/// Translate a domain field failure into an HTTP validation error.
pub(crate) fn student_field_error(error: StudentValidationError) -> Error {
    let field = error.field();
    let message = error.to_string();
    match error {
        StudentValidationError::EmptyName
        | StudentValidationError::EmptyEmail
        | StudentValidationError::EmptyCourse => {
            field_error(field, message, ValidationCode::MissingField)
        }
        StudentValidationError::NameTooShort { min }
        | StudentValidationError::CourseTooShort { min } => {
            Error::invalid_request(message).with_details(json!({
                "field": field,
                "code": ValidationCode::TooShort.as_str(),
                "min": min,
            }))
        }
        StudentValidationError::NameTooLong { max }
        | StudentValidationError::CourseTooLong { max } => {
            Error::invalid_request(message).with_details(json!({
                "field": field,
                "code": ValidationCode::TooLong.as_str(),
                "max": max,
            }))
        }
        StudentValidationError::InvalidEmail => {
            field_error(field, message, ValidationCode::InvalidEmail)
        }
        StudentValidationError::InvalidId | StudentValidationError::UpdatedBeforeCreated => {
            Error::invalid_request(message).with_details(json!({ "field": field }))
        }
    }
}
