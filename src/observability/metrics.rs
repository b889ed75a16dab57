//! Metrics collection and exposition.
//!
//! # Metrics
//! - `upload_requests_total` (counter): uploads by outcome, status
//! - `upload_request_duration_seconds` (histogram): time to upstream response head

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one upload. `outcome` is `forwarded` or a proxy error kind.
pub fn record_upload(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "upload_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("upload_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
