//! Backend service descriptors
//!
//! One descriptor per proxied backend. The table is immutable after load;
//! there is no runtime service registration.

use super::{default_health_path, default_hourly_quota, default_timeout};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single backend service behind the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Service name, also the first path segment on proxied routes
    pub name: String,
    /// Base address requests are forwarded to, e.g. `http://localhost:8001`
    pub base_url: String,
    /// Path probed by the health aggregator
    #[serde(default = "default_health_path")]
    pub health_path: String,
    /// Requests allowed per tenant in any trailing hour
    #[serde(default = "default_hourly_quota")]
    pub hourly_quota: u32,
    /// Upstream timeout in seconds for forwarded requests
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ServiceDescriptor {
    /// Upstream timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate a single descriptor
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("service name must not be empty".to_string());
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("service {}: invalid base_url: {}", self.name, e))?;
        if !self.health_path.starts_with('/') {
            return Err(format!(
                "service {}: health_path must start with '/'",
                self.name
            ));
        }
        if self.hourly_quota == 0 {
            return Err(format!("service {}: hourly_quota must be > 0", self.name));
        }
        Ok(())
    }
}

/// Built-in service table used when the config file lists no services
pub fn default_services() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor {
            name: "analytics".to_string(),
            base_url: "http://localhost:8001".to_string(),
            health_path: default_health_path(),
            hourly_quota: 1000,
            timeout_secs: 30,
        },
        ServiceDescriptor {
            name: "communications".to_string(),
            base_url: "http://localhost:8002".to_string(),
            health_path: default_health_path(),
            hourly_quota: 500,
            timeout_secs: 30,
        },
        ServiceDescriptor {
            name: "billing".to_string(),
            base_url: "http://localhost:8003".to_string(),
            health_path: default_health_path(),
            hourly_quota: 200,
            timeout_secs: 30,
        },
        ServiceDescriptor {
            name: "automation".to_string(),
            base_url: "http://localhost:8000".to_string(),
            health_path: default_health_path(),
            hourly_quota: 2000,
            timeout_secs: 45,
        },
    ]
}
