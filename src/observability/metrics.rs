//! Metrics collection and exposition.
//!
//! # Metrics
//! - `upstream_requests_total` (counter): upstream calls by operation and outcome
//! - `upstream_request_duration_seconds` (histogram): upstream call latency
//!
//! Recording is a no-op until a recorder is installed, so the exporter is
//! only started when `observability.metrics_enabled` is set.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Record one upstream call. `outcome` is the status code or a failure label.
pub fn record_upstream_call(operation: &'static str, outcome: &str, start: Instant) {
    metrics::counter!(
        "upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome.to_string()
    )
    .increment(1);
    metrics::histogram!("upstream_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}
