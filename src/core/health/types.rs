//! Health snapshot types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Liveness of a single backend service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Probe answered 200 within the probe timeout
    Healthy,
    /// Probe errored, timed out, or answered a non-200 status
    Unhealthy,
}

/// Aggregate status across all services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every registered service is healthy
    Healthy,
    /// At least one service is unhealthy
    Degraded,
}

/// Probe result for one service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    /// Probe outcome
    pub status: HealthStatus,
    /// Probe round-trip time in milliseconds
    pub response_time_ms: u64,
    /// When the probe completed
    pub last_check: DateTime<Utc>,
    /// Error description when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Point-in-time aggregate of all backend liveness probes
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    /// Per-service probe results
    pub services: HashMap<String, ServiceHealth>,
    /// Degraded as soon as any one service is unhealthy
    pub overall: OverallStatus,
}

impl HealthSnapshot {
    /// Build a snapshot, deriving the overall status from the entries
    pub fn from_services(services: HashMap<String, ServiceHealth>) -> Self {
        let overall = if services.values().all(|s| s.status == HealthStatus::Healthy) {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        };
        Self { services, overall }
    }
}
