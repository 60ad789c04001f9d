//! Metrics collection.
//!
//! # Metrics
//! - `pause_sdk_operations_total` (counter): operations by operation, network, outcome
//! - `pause_sdk_probe_total` (counter): pause-state probe attempts by method, outcome
//!
//! Recording is a no-op until the host process installs a recorder.

/// Record the outcome of a public operation.
pub fn record_operation(operation: &'static str, network: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "pause_sdk_operations_total",
        "operation" => operation,
        "network" => network,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one pause-state probe attempt.
pub fn record_probe(method: &'static str, outcome: &'static str) {
    ::metrics::counter!("pause_sdk_probe_total", "method" => method, "outcome" => outcome).increment(1);
}
