//! Monitoring and telemetry

pub mod metrics;

pub use metrics::{GatewayMetrics, MetricsCollector, Outcome};
