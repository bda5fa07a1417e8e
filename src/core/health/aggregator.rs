//! Health aggregator
//!
//! Probes every registered service concurrently and folds the results into
//! one snapshot. Probes carry their own short timeout, independent of the
//! services' forwarding timeouts: this is a liveness check, not a data call.
//! A failed probe is captured in the snapshot, never propagated.

use super::types::{HealthSnapshot, HealthStatus, ServiceHealth};
use crate::config::ServiceDescriptor;
use crate::core::registry::ServiceRegistry;
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-probe timeout, much shorter than forwarding timeouts
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Concurrent backend liveness prober
pub struct HealthAggregator {
    registry: Arc<ServiceRegistry>,
    client: reqwest::Client,
}

impl HealthAggregator {
    /// Create an aggregator over the given registry
    ///
    /// Uses its own client so probes are never queued behind proxy traffic.
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self {
            registry,
            client: reqwest::Client::new(),
        }
    }

    /// Probe every service concurrently and produce a fresh snapshot
    ///
    /// Nothing is cached between calls; probe ordering is irrelevant.
    pub async fn check_all(&self) -> HealthSnapshot {
        let probes = self.registry.iter().map(|descriptor| self.probe(descriptor));
        let results = futures::future::join_all(probes).await;
        HealthSnapshot::from_services(results.into_iter().collect())
    }

    async fn probe(&self, descriptor: &ServiceDescriptor) -> (String, ServiceHealth) {
        let url = format!(
            "{}{}",
            descriptor.base_url.trim_end_matches('/'),
            descriptor.health_path
        );
        let start = Instant::now();

        let health = match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => {
                let status = if response.status().is_success() {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Unhealthy
                };
                let error = if status == HealthStatus::Unhealthy {
                    Some(format!("status {}", response.status().as_u16()))
                } else {
                    None
                };
                ServiceHealth {
                    status,
                    response_time_ms: start.elapsed().as_millis() as u64,
                    last_check: Utc::now(),
                    error,
                }
            }
            Err(e) => {
                debug!(service = %descriptor.name, error = %e, "Health probe failed");
                ServiceHealth {
                    status: HealthStatus::Unhealthy,
                    response_time_ms: start.elapsed().as_millis() as u64,
                    last_check: Utc::now(),
                    error: Some(e.to_string()),
                }
            }
        };

        (descriptor.name.clone(), health)
    }
}
