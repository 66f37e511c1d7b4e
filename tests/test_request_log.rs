//! Structured access log: one JSON event per request, tied to the response's correlation id.

use assignment_submission_api::transport;
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};

/// Shared in-memory sink for the JSON formatter.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Single-threaded runtime: the server task runs on this thread, so the
// thread-local subscriber sees its events.
#[tokio::test]
async fn test_one_access_log_event_per_request() -> Result<(), Box<dyn std::error::Error>> {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_writer(move || sink.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let router = transport::http::create_router(transport::http::AppState::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let resp = reqwest::Client::new()
        .get(format!("http://127.0.0.1:{}/assignments/nonexistent-id", port))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);
    let request_id = resp
        .headers()
        .get(transport::http::REQUEST_ID_HEADER)
        .expect("x-request-id header")
        .to_str()?
        .to_string();

    let events: Vec<Value> = logs
        .lines()
        .into_iter()
        .filter(|e| e["message"] == "request completed")
        .collect();
    assert_eq!(events.len(), 1, "expected exactly one access log event: {:?}", events);

    let event = &events[0];
    assert_eq!(event["request_id"], request_id.as_str());
    assert_eq!(event["method"], "GET");
    assert_eq!(event["path"], "/assignments/nonexistent-id");
    assert_eq!(event["status"], 404);
    assert!(event["duration_ms"].as_f64().is_some_and(|ms| ms >= 0.0));
    assert!(event["timestamp"].is_string());

    Ok(())
}
