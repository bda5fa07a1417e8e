//! Gateway metrics collector
//!
//! One process-wide instance. Counters are updated after a forwarding attempt
//! resolves into an outcome, never while a request is in flight; per-tenant
//! usage is recorded by the pipeline when a tenant is resolved, regardless of
//! the eventual outcome. The average latency is an incremental mean, so no
//! latency history is retained.

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Outcome of a forwarding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Upstream answered (any status below 400)
    Success,
    /// Upstream answered with an error status, timed out, or was unreachable
    Failure,
}

/// Snapshot of gateway-wide counters
#[derive(Debug, Clone, Serialize)]
pub struct GatewayMetrics {
    /// Forwarding attempts, successes plus failures
    pub total_requests: u64,
    /// Attempts that produced a non-error upstream response
    pub successful_requests: u64,
    /// Attempts that failed or produced an error status
    pub failed_requests: u64,
    /// Incremental mean forwarding latency in milliseconds
    pub avg_response_time_ms: f64,
    /// Requests seen per tenant, counted at resolution time
    pub tenant_usage: HashMap<String, u64>,
    /// Seconds since the collector was created
    pub uptime_secs: u64,
    /// successful_requests / total_requests, as a percentage
    pub success_rate: f64,
}

#[derive(Debug, Default)]
struct MetricsInner {
    total: u64,
    succeeded: u64,
    failed: u64,
    avg_latency_ms: f64,
    tenant_usage: HashMap<String, u64>,
}

/// Accumulates request counters and per-tenant usage
#[derive(Debug)]
pub struct MetricsCollector {
    inner: RwLock<MetricsInner>,
    start_time: Instant,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MetricsInner::default()),
            start_time: Instant::now(),
        }
    }

    /// Record one completed forwarding attempt
    pub fn record(&self, outcome: Outcome, latency: Duration) {
        let mut inner = self.inner.write();
        inner.total += 1;
        match outcome {
            Outcome::Success => inner.succeeded += 1,
            Outcome::Failure => inner.failed += 1,
        }
        // Incremental mean: avg' = (avg * (n - 1) + latency) / n
        let n = inner.total as f64;
        let latency_ms = latency.as_secs_f64() * 1000.0;
        inner.avg_latency_ms = (inner.avg_latency_ms * (n - 1.0) + latency_ms) / n;
    }

    /// Count a request against a tenant, independent of its outcome
    pub fn record_tenant(&self, tenant_id: &str) {
        let mut inner = self.inner.write();
        *inner.tenant_usage.entry(tenant_id.to_string()).or_insert(0) += 1;
    }

    /// Usage count for one tenant, if it has been seen
    pub fn tenant_usage(&self, tenant_id: &str) -> Option<u64> {
        self.inner.read().tenant_usage.get(tenant_id).copied()
    }

    /// Copy out the current counters
    pub fn snapshot(&self) -> GatewayMetrics {
        let inner = self.inner.read();
        let success_rate = if inner.total > 0 {
            inner.succeeded as f64 / inner.total as f64 * 100.0
        } else {
            0.0
        };
        GatewayMetrics {
            total_requests: inner.total,
            successful_requests: inner.succeeded,
            failed_requests: inner.failed,
            avg_response_time_ms: inner.avg_latency_ms,
            tenant_usage: inner.tenant_usage.clone(),
            uptime_secs: self.start_time.elapsed().as_secs(),
            success_rate,
        }
    }
}
