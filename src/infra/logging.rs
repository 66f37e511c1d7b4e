//! Tracing subscriber setup.

use crate::infra::config::{self, LogFormat};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Fails if the filter is malformed or a
/// subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(config::log_filter())?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config::log_format() {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?,
        LogFormat::Pretty => builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?,
    }

    Ok(())
}
