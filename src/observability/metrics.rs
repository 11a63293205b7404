//! RPC metrics.
//!
//! # Metrics
//! - `seele_rpc_requests_total` (counter): requests by method, outcome
//! - `seele_rpc_request_duration_seconds` (histogram): latency by method
//!
//! Without an installed recorder these are no-ops.

use std::time::Duration;

/// Record one completed RPC call.
pub fn record_rpc_call(method: &str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(
        "seele_rpc_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "seele_rpc_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(elapsed.as_secs_f64());
}
