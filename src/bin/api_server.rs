// src/bin/api_server.rs

use anyhow::Context;
use assignment_submission_api::infra::{config, logging};
use assignment_submission_api::transport;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init()?;

    // --- Store Initialization ---
    // The store lives only as long as this process; it starts empty.
    let app_state = transport::http::AppState::new();
    info!("assignment store initialized (in-memory, empty)");

    // --- API Server Initialization ---
    let mut app = transport::http::create_router(app_state.clone());
    if config::cors_allow_any() {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr = config::bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let remaining = app_state.store.read().await.len();
    info!(discarded_records = remaining, "graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received (Ctrl+C)"),
        Err(e) => error!(error = %e, "failed to listen for shutdown signal"),
    }
}
