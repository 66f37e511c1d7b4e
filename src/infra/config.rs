//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output format of the request/event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable, for local development.
    Pretty,
}

/// Address the HTTP server listens on (`BIND_ADDR`).
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    let raw = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    raw.parse::<SocketAddr>()
        .with_context(|| format!("BIND_ADDR must be a socket address, got '{}'", raw))
}

/// Log format (`LOG_FORMAT`): `json` (default) or `pretty`.
pub fn log_format() -> LogFormat {
    parse_log_format(std::env::var("LOG_FORMAT").ok().as_deref())
}

/// Tracing filter directives (`RUST_LOG`), defaulting to `info`.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Whether to install a permissive CORS layer (`CORS_ALLOW_ANY`, default true).
pub fn cors_allow_any() -> bool {
    parse_flag(std::env::var("CORS_ALLOW_ANY").ok().as_deref(), true)
}

fn parse_log_format(raw: Option<&str>) -> LogFormat {
    match raw.map(|v| v.trim().to_lowercase()).as_deref() {
        Some("pretty") | Some("text") => LogFormat::Pretty,
        _ => LogFormat::Json,
    }
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|v| v.trim().to_lowercase()).as_deref() {
        Some("true") | Some("1") | Some("yes") => true,
        Some("false") | Some("0") | Some("no") => false,
        _ => default,
    }
}
