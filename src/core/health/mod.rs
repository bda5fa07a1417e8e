//! Backend health aggregation

pub mod aggregator;
pub mod types;

pub use aggregator::{HealthAggregator, PROBE_TIMEOUT};
pub use types::{HealthSnapshot, HealthStatus, OverallStatus, ServiceHealth};
