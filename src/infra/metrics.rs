//! Request counters and latency histogram, exported in Prometheus text format.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Default Prometheus latency buckets (seconds).
pub const DURATION_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RequestLabels {
    method: String,
    endpoint: String,
    status: u16,
}

#[derive(Debug, Default)]
struct Histogram {
    // Per-bucket (non-cumulative) counts; the last slot is +Inf.
    buckets: [u64; DURATION_BUCKETS.len() + 1],
    sum: f64,
    count: u64,
}

impl Histogram {
    fn observe(&mut self, seconds: f64) {
        let slot = DURATION_BUCKETS
            .iter()
            .position(|upper| seconds <= *upper)
            .unwrap_or(DURATION_BUCKETS.len());
        self.buckets[slot] += 1;
        self.sum += seconds;
        self.count += 1;
    }
}

#[derive(Debug, Default)]
struct Inner {
    requests: BTreeMap<RequestLabels, u64>,
    duration: Histogram,
}

/// Process-wide HTTP metrics. Cheap to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct HttpMetrics {
    inner: Mutex<Inner>,
}

impl HttpMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Counters stay meaningful even if a holder panicked.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Counts one finished request and records its duration.
    pub fn record(&self, method: &str, endpoint: &str, status: u16, elapsed: Duration) {
        let labels = RequestLabels {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status,
        };
        let mut inner = self.lock();
        *inner.requests.entry(labels).or_insert(0) += 1;
        inner.duration.observe(elapsed.as_secs_f64());
    }

    #[cfg(test)]
    fn request_count(&self, method: &str, endpoint: &str, status: u16) -> u64 {
        let labels = RequestLabels {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status,
        };
        self.lock().requests.get(&labels).copied().unwrap_or(0)
    }

    /// Renders all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let inner = self.lock();
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "# HELP http_requests_total Total HTTP requests");
        let _ = writeln!(out, "# TYPE http_requests_total counter");
        for (labels, count) in &inner.requests {
            let _ = writeln!(
                out,
                "http_requests_total{{method=\"{}\",endpoint=\"{}\",status=\"{}\"}} {}",
                escape_label(&labels.method),
                escape_label(&labels.endpoint),
                labels.status,
                count
            );
        }

        let _ = writeln!(out, "# HELP http_request_duration_seconds HTTP request duration");
        let _ = writeln!(out, "# TYPE http_request_duration_seconds histogram");
        let mut cumulative = 0u64;
        for (upper, count) in DURATION_BUCKETS.iter().zip(inner.duration.buckets.iter()) {
            cumulative += count;
            let _ = writeln!(
                out,
                "http_request_duration_seconds_bucket{{le=\"{}\"}} {}",
                format_bound(*upper),
                cumulative
            );
        }
        let _ = writeln!(
            out,
            "http_request_duration_seconds_bucket{{le=\"+Inf\"}} {}",
            inner.duration.count
        );
        let _ = writeln!(out, "http_request_duration_seconds_sum {}", inner.duration.sum);
        let _ = writeln!(out, "http_request_duration_seconds_count {}", inner.duration.count);

        out
    }
}

fn format_bound(upper: f64) -> String {
    if upper.fract() == 0.0 {
        format!("{:.1}", upper)
    } else {
        upper.to_string()
    }
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
