//! Observability for the bot gateway client.
//!
//! Metrics go through the `metrics` facade; the embedding application
//! decides whether and how to export them. Without an installed recorder
//! every call is a no-op.
//!
//! # Metrics
//!
//! | Metric | Type | Labels | Purpose |
//! |--------|------|--------|---------|
//! | `bot_rpc_total` | Counter | `method`, `status` | Calls to the bot service by outcome |
//! | `bot_rpc_duration_seconds` | Histogram | `method` | Time until response (headers for `join_meeting`) |
//! | `bot_join_events_total` | Counter | `state` | Progress events received on join streams |
//! | `bot_join_streams_active` | Gauge | none | Join streams with a running receive task |
//! | `bot_join_stream_terminations_total` | Counter | `outcome` | How join streams ended |
//!
//! Labels are bounded: `method` (3), `status` (`ok` plus `BotError::label`
//! values), `state` (5), `outcome` (4).

pub mod metrics;
