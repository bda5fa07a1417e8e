//! Tenancy configuration
//!
//! Controls host-based tenant resolution: the platform base domain and the
//! static custom-domain table consulted for hosts outside it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tenancy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenancyConfig {
    /// Platform base domain; `{tenant}.{base_domain}` resolves by subdomain
    #[serde(default = "default_base_domain")]
    pub base_domain: String,
    /// Scheme used when building redirect locations
    #[serde(default = "default_scheme")]
    pub redirect_scheme: String,
    /// Static custom-domain table: host -> tenant id
    #[serde(default)]
    pub custom_domains: HashMap<String, String>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            base_domain: default_base_domain(),
            redirect_scheme: default_scheme(),
            custom_domains: HashMap::new(),
        }
    }
}

impl TenancyConfig {
    /// Validate the tenancy configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_domain.is_empty() {
            return Err("base_domain must not be empty".to_string());
        }
        if self.base_domain.starts_with('.') || self.base_domain.ends_with('.') {
            return Err("base_domain must not start or end with '.'".to_string());
        }
        if self.redirect_scheme != "http" && self.redirect_scheme != "https" {
            return Err("redirect_scheme must be http or https".to_string());
        }
        Ok(())
    }
}

fn default_base_domain() -> String {
    "tause.pro".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}
