//! Sliding-window rate limiter
//!
//! One window of request timestamps per (tenant, service) pair, trailing one
//! hour. Pruning happens lazily on each check and map keys are never evicted,
//! so tenants that go silent leave empty windows behind for the process
//! lifetime. Pruning is O(window size) per call; both are accepted limits of
//! this design.
//!
//! Admission is atomic: prune, check, and append happen under a single write
//! lock acquisition with no await point inside, so the quota invariant holds
//! under any request interleaving.

use super::types::AdmitDecision;
use crate::core::registry::ServiceRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Sliding window length
pub const WINDOW: Duration = Duration::from_secs(3600);

type RateKey = (String, String);

/// Per-(tenant, service) sliding-window admission control
pub struct RateLimiter {
    registry: Arc<ServiceRegistry>,
    windows: RwLock<HashMap<RateKey, Vec<Instant>>>,
    window: Duration,
}

impl RateLimiter {
    /// Create a limiter enforcing the one-hour window
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self::with_window(registry, WINDOW)
    }

    /// Create a limiter with a custom window (shorter windows for tests)
    pub fn with_window(registry: Arc<ServiceRegistry>, window: Duration) -> Self {
        Self {
            registry,
            windows: RwLock::new(HashMap::new()),
            window,
        }
    }

    /// Check and record a request against the service's hourly quota
    ///
    /// An admitted request appends its timestamp; a rejected one leaves the
    /// window untouched. Requests for unregistered services are rejected,
    /// though the pipeline resolves the service before admission.
    pub async fn admit(&self, tenant_id: &str, service: &str) -> AdmitDecision {
        let Some(descriptor) = self.registry.get(service) else {
            return AdmitDecision::rejected(0, 0, 0);
        };
        let quota = descriptor.hourly_quota;

        let mut windows = self.windows.write().await;
        let entry = windows
            .entry((tenant_id.to_string(), service.to_string()))
            .or_default();
        entry.retain(|t| t.elapsed() < self.window);

        let count = entry.len() as u32;
        if count >= quota {
            // retain() keeps order, so the first entry is the oldest
            let retry_after = entry
                .first()
                .map(|oldest| self.window.saturating_sub(oldest.elapsed()).as_secs())
                .unwrap_or(0);
            debug!(tenant_id, service, count, quota, "Admission rejected");
            return AdmitDecision::rejected(count, quota, retry_after);
        }

        entry.push(Instant::now());
        AdmitDecision::admitted(count + 1, quota)
    }

    /// Current in-window request counts per service for one tenant
    pub async fn windows_for(&self, tenant_id: &str) -> HashMap<String, u32> {
        let windows = self.windows.read().await;
        windows
            .iter()
            .filter(|((tenant, _), _)| tenant == tenant_id)
            .map(|((_, service), entries)| (service.clone(), self.in_window(entries)))
            .collect()
    }

    /// Services a tenant has sent traffic to
    pub async fn services_used(&self, tenant_id: &str) -> Vec<String> {
        let windows = self.windows.read().await;
        let mut services: Vec<String> = windows
            .keys()
            .filter(|(tenant, _)| tenant == tenant_id)
            .map(|(_, service)| service.clone())
            .collect();
        services.sort();
        services
    }

    /// Current in-window counts for every tenant and service
    pub async fn all_windows(&self) -> HashMap<String, HashMap<String, u32>> {
        let windows = self.windows.read().await;
        let mut result: HashMap<String, HashMap<String, u32>> = HashMap::new();
        for ((tenant, service), entries) in windows.iter() {
            result
                .entry(tenant.clone())
                .or_default()
                .insert(service.clone(), self.in_window(entries));
        }
        result
    }

    /// Drop all windows for a tenant; a no-op for tenants without traffic
    pub async fn reset(&self, tenant_id: &str) {
        let mut windows = self.windows.write().await;
        windows.retain(|(tenant, _), _| tenant != tenant_id);
    }

    fn in_window(&self, entries: &[Instant]) -> u32 {
        entries.iter().filter(|t| t.elapsed() < self.window).count() as u32
    }
}
