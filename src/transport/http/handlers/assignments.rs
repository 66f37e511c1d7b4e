use crate::transport::http::handlers::common::{
    parse_assignment_id, parse_filter, parse_grade, parse_submission, ApiError,
};
use crate::transport::http::types::{
    AppState, AssignmentResponse, ListAssignmentsQuery, MessageResponse,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

#[utoipa::path(
    post,
    path = "/assignments/submit",
    request_body = SubmitAssignmentRequest,
    responses(
        (status = 200, description = "Submission stored", body = AssignmentResponse),
        (status = 400, description = "Invalid body or assignment type", body = ErrorResponse)
    )
)]
pub async fn submit_assignment_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let Json(body) = body?;
    let submission = parse_submission(&body).map_err(|fields| {
        warn!(fields = fields.len(), "rejected assignment submission");
        ApiError::validation(fields)
    })?;

    let record = state.store.write().await.create(submission);
    info!(
        assignment_id = %record.id,
        student_id = %record.student_id,
        assignment_type = %record.assignment_type,
        "assignment submitted"
    );

    Ok(Json(AssignmentResponse::from(record)))
}

#[utoipa::path(
    get,
    path = "/assignments",
    params(ListAssignmentsQuery),
    responses(
        (status = 200, description = "Matching submissions", body = Vec<AssignmentResponse>),
        (status = 400, description = "Unknown assignment type or malformed query string", body = ErrorResponse)
    )
)]
pub async fn list_assignments_handler(
    State(state): State<AppState>,
    query: Result<Query<ListAssignmentsQuery>, QueryRejection>,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    let Query(query) = query?;
    let filter = parse_filter(&query)?;
    let records = state.store.read().await.list(&filter);
    debug!(count = records.len(), "listed assignments");

    Ok(Json(records.iter().map(AssignmentResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/assignments/{id}",
    params(("id" = String, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "The submission", body = AssignmentResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    )
)]
pub async fn get_assignment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let id = parse_assignment_id(&id)?;
    let store = state.store.read().await;
    let record = store.get(&id)?;

    Ok(Json(AssignmentResponse::from(record)))
}

#[utoipa::path(
    put,
    path = "/assignments/{id}/grade",
    params(("id" = String, Path, description = "Assignment id")),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Graded submission", body = AssignmentResponse),
        (status = 400, description = "Grade missing, not a number, or outside 0-100", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    )
)]
pub async fn grade_assignment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let id = parse_assignment_id(&id)?;
    let Json(body) = body?;
    let grade = parse_grade(&body).map_err(ApiError::validation)?;

    let record = state
        .store
        .write()
        .await
        .set_grade(&id, grade)
        .map_err(|e| {
            warn!(assignment_id = %id, error = %e, "grading rejected");
            ApiError::from(e)
        })?;
    info!(assignment_id = %record.id, grade, "assignment graded");

    Ok(Json(AssignmentResponse::from(record)))
}

#[utoipa::path(
    delete,
    path = "/assignments/{id}",
    params(("id" = String, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Submission deleted", body = MessageResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    )
)]
pub async fn delete_assignment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_assignment_id(&id)?;
    let removed = state.store.write().await.delete(&id)?;
    info!(assignment_id = %removed.id, "assignment deleted");

    Ok(Json(MessageResponse {
        message: "Assignment deleted".to_string(),
    }))
}
