//! Metrics definitions for the bot gateway client.
//!
//! All metrics follow Prometheus naming conventions:
//! - `bot_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms

use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Record a completed bot service call.
///
/// Metrics: `bot_rpc_total`, `bot_rpc_duration_seconds`
/// Labels: `method`, `status`
pub fn record_rpc(method: &'static str, status: &'static str, duration: Duration) {
    counter!("bot_rpc_total", "method" => method, "status" => status).increment(1);
    histogram!("bot_rpc_duration_seconds", "method" => method).record(duration.as_secs_f64());
}

/// Record one progress event received on a join stream.
///
/// Metric: `bot_join_events_total`
/// Labels: `state`
pub fn record_join_event(state: &'static str) {
    counter!("bot_join_events_total", "state" => state).increment(1);
}

/// A join stream receive task started.
///
/// Metric: `bot_join_streams_active`
pub fn join_stream_opened() {
    gauge!("bot_join_streams_active").increment(1.0);
}

/// A join stream receive task exited.
///
/// Metrics: `bot_join_streams_active`, `bot_join_stream_terminations_total`
/// Labels: `outcome` (completed, failed, cancelled, deadline_exceeded)
pub fn join_stream_closed(outcome: &'static str) {
    gauge!("bot_join_streams_active").decrement(1.0);
    counter!("bot_join_stream_terminations_total", "outcome" => outcome).increment(1);
}
