//! Configuration data models
//!
//! Structures deserialized from the gateway YAML file, split by concern.

pub mod server;
pub mod services;
pub mod tenancy;

pub use server::*;
pub use services::*;
pub use tenancy::*;

/// Default bind host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    9000
}

/// Default upstream timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default hourly quota per tenant and service
pub fn default_hourly_quota() -> u32 {
    1000
}

/// Default health path probed on each backend
pub fn default_health_path() -> String {
    "/health".to_string()
}
