use crate::domain::{AssignmentFilter, AssignmentType, NewSubmission, StoreError};
use crate::transport::http::types::{ErrorResponse, FieldError, ListAssignmentsQuery};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use uuid::Uuid;

pub const REQUIRED_SUBMISSION_FIELDS: [&str; 5] = [
    "student_name",
    "student_id",
    "assignment_type",
    "assignment_name",
    "submission_url",
];

/// Optional on the wire, ignored by the store.
const TOLERATED_SUBMISSION_FIELDS: [&str; 1] = ["submitted_at"];

const ASSIGNMENT_TYPE_EXPECTED: &str = "one of: test, lab";

/// Client-facing request failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Assignment not found")]
    NotFound,

    #[error("Grade must be between 0 and 100")]
    InvalidGrade,

    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn validation(fields: Vec<FieldError>) -> Self {
        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        ApiError::Validation {
            message: format!("Invalid request: {}", names.join(", ")),
            fields,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidGrade | ApiError::Validation { .. } | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
            StoreError::InvalidGrade { .. } => ApiError::InvalidGrade,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", err.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query string: {}", err.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let fields = match self {
            ApiError::Validation { fields, .. } => fields,
            _ => Vec::new(),
        };
        (status, Json(ErrorResponse { error, fields })).into_response()
    }
}

/// Ids that are not UUIDs can never be stored, so they are simply not found.
pub fn parse_assignment_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::NotFound)
}

pub fn json_type_name(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn field_error(field: &str, expected: &str, got: impl Into<String>) -> FieldError {
    FieldError {
        field: field.to_string(),
        expected: expected.to_string(),
        got: got.into(),
    }
}

fn expect_object<'a>(body: &'a JsonValue) -> Result<&'a Map<String, JsonValue>, Vec<FieldError>> {
    body.as_object()
        .ok_or_else(|| vec![field_error("body", "object", json_type_name(body))])
}

/// Validates a submission body, collecting every offending field.
pub fn parse_submission(body: &JsonValue) -> Result<NewSubmission, Vec<FieldError>> {
    let obj = expect_object(body)?;
    let mut errors = Vec::new();

    let mut text = |field: &str| -> Option<String> {
        match obj.get(field) {
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(other) => {
                errors.push(field_error(field, "string", json_type_name(other)));
                None
            }
            None => {
                errors.push(field_error(field, "string", "missing"));
                None
            }
        }
    };

    let student_name = text("student_name");
    let student_id = text("student_id");
    let assignment_type_raw = text("assignment_type");
    let assignment_name = text("assignment_name");
    let submission_url = text("submission_url");

    let assignment_type = assignment_type_raw.and_then(|raw| match raw.parse::<AssignmentType>() {
        Ok(t) => Some(t),
        Err(_) => {
            errors.push(field_error(
                "assignment_type",
                ASSIGNMENT_TYPE_EXPECTED,
                format!("'{}'", raw),
            ));
            None
        }
    });

    if let Some(v) = obj.get("submitted_at") {
        if !(v.is_string() || v.is_null()) {
            errors.push(field_error("submitted_at", "string or null", json_type_name(v)));
        }
    }

    for (key, value) in obj {
        let known = REQUIRED_SUBMISSION_FIELDS.contains(&key.as_str())
            || TOLERATED_SUBMISSION_FIELDS.contains(&key.as_str());
        if !known {
            errors.push(field_error(key, "no such field", json_type_name(value)));
        }
    }

    match (
        student_name,
        student_id,
        assignment_type,
        assignment_name,
        submission_url,
    ) {
        (
            Some(student_name),
            Some(student_id),
            Some(assignment_type),
            Some(assignment_name),
            Some(submission_url),
        ) if errors.is_empty() => Ok(NewSubmission {
            student_name,
            student_id,
            assignment_type,
            assignment_name,
            submission_url,
        }),
        _ => Err(errors),
    }
}

/// Extracts the numeric `grade`. The range is checked by the store.
pub fn parse_grade(body: &JsonValue) -> Result<f64, Vec<FieldError>> {
    let obj = expect_object(body)?;
    match obj.get("grade") {
        Some(v) => v
            .as_f64()
            .ok_or_else(|| vec![field_error("grade", "number", json_type_name(v))]),
        None => Err(vec![field_error("grade", "number", "missing")]),
    }
}

/// Turns list query parameters into a store filter. Empty `student_id` means no filter.
pub fn parse_filter(query: &ListAssignmentsQuery) -> Result<AssignmentFilter, ApiError> {
    let assignment_type = match query.assignment_type.as_deref() {
        Some(raw) => Some(raw.parse::<AssignmentType>().map_err(|_| {
            ApiError::validation(vec![field_error(
                "assignment_type",
                ASSIGNMENT_TYPE_EXPECTED,
                format!("'{}'", raw),
            )])
        })?),
        None => None,
    };
    let student_id = query.student_id.clone().filter(|s| !s.is_empty());

    Ok(AssignmentFilter {
        assignment_type,
        student_id,
    })
}
