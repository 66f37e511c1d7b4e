//! Per-request correlation id, structured access log and metrics.

use crate::transport::http::types::AppState;
use axum::extract::{MatchedPath, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Metrics label for requests that matched no route.
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

pub async fn observe_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    // Route template rather than raw path, so ids don't explode label cardinality.
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());

    let mut response = next.run(request).await;

    let elapsed = started.elapsed();
    let status = response.status().as_u16();
    state
        .metrics
        .record(method.as_str(), &endpoint, status, elapsed);

    let duration_ms = (elapsed.as_secs_f64() * 100_000.0).round() / 100.0;
    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status,
        duration_ms,
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
