use crate::domain::{AssignmentRecord, AssignmentType};
use crate::infra::metrics::HttpMetrics;
use crate::storage::AssignmentStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<AssignmentStore>>,
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    /// Fresh state with an empty store and zeroed metrics.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(AssignmentStore::new())),
            metrics: Arc::new(HttpMetrics::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of `POST /assignments/submit`.
///
/// Only used for the OpenAPI document; the handler validates the raw JSON so it
/// can report every offending field at once.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct SubmitAssignmentRequest {
    pub student_name: String,
    pub student_id: String,
    pub assignment_type: AssignmentType,
    pub assignment_name: String,
    pub submission_url: String,
    /// Accepted for compatibility and ignored; the server stamps the submission time.
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// Body of `PUT /assignments/{id}/grade`.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct GradeRequest {
    /// Between 0 and 100 inclusive.
    pub grade: f64,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAssignmentsQuery {
    /// `test` or `lab`.
    pub assignment_type: Option<String>,
    pub student_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub assignment_type: AssignmentType,
    pub assignment_name: String,
    pub submission_url: String,
    pub submitted_at: DateTime<Utc>,
    pub grade: Option<f64>,
    pub graded_at: Option<DateTime<Utc>>,
}

impl From<&AssignmentRecord> for AssignmentResponse {
    fn from(record: &AssignmentRecord) -> Self {
        Self {
            id: record.id,
            student_name: record.student_name.clone(),
            student_id: record.student_id.clone(),
            assignment_type: record.assignment_type,
            assignment_name: record.assignment_name.clone(),
            submission_url: record.submission_url.clone(),
            submitted_at: record.submitted_at,
            grade: record.grade(),
            graded_at: record.graded_at(),
        }
    }
}

impl From<AssignmentRecord> for AssignmentResponse {
    fn from(record: AssignmentRecord) -> Self {
        Self::from(&record)
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// One rejected input field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub expected: String,
    pub got: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}
