//! Lightweight in-process metrics.
//!
//! Decision outcomes, granted scopes, decode failures and snapshot loads are
//! stored as atomics and rendered by the `/metrics` handler in Prometheus text
//! format.

pub mod metrics;

pub use metrics::GatewayMetrics;
