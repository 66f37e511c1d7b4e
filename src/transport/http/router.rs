use crate::domain::AssignmentType;
use crate::transport::http::handlers::{assignments, health, metrics};
use crate::transport::http::middleware::observe_requests;
use crate::transport::http::types::{
    AppState, AssignmentResponse, ErrorResponse, FieldError, GradeRequest, HealthResponse,
    MessageResponse, ServiceInfoResponse, SubmitAssignmentRequest,
};
use axum::routing::{get, post, put};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Assignment Submission API"),
    paths(
        health::root_handler,
        health::healthcheck_handler,
        metrics::metrics_handler,
        assignments::submit_assignment_handler,
        assignments::list_assignments_handler,
        assignments::get_assignment_handler,
        assignments::grade_assignment_handler,
        assignments::delete_assignment_handler
    ),
    components(schemas(
        AssignmentType,
        SubmitAssignmentRequest,
        GradeRequest,
        AssignmentResponse,
        ServiceInfoResponse,
        HealthResponse,
        MessageResponse,
        ErrorResponse,
        FieldError
    ))
)]
pub struct ApiDoc;

/// Full application router: API routes, OpenAPI docs and the observability layer.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/assignments", get(assignments::list_assignments_handler))
        .route("/assignments/submit", post(assignments::submit_assignment_handler))
        .route(
            "/assignments/:id",
            get(assignments::get_assignment_handler).delete(assignments::delete_assignment_handler),
        )
        .route("/assignments/:id/grade", put(assignments::grade_assignment_handler))
        .with_state(app_state.clone())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn_with_state(app_state, observe_requests))
}
