//! Configuration management for the gateway
//!
//! Loads and validates the gateway configuration from a YAML file. When no
//! file is present the built-in defaults (local service table, `tause.pro`
//! tenancy) are used so the binary runs out of the box.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Tenancy and domain resolution settings
    #[serde(default)]
    pub tenancy: TenancyConfig,
    /// Backend service table; empty means the built-in defaults
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            tenancy: TenancyConfig::default(),
            services: default_services(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        if config.services.is_empty() {
            debug!("No services configured, using built-in service table");
            config.services = default_services();
        }

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load from the given path if it exists, otherwise fall back to defaults
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path).await
        } else {
            info!("No config file at {:?}, using defaults", path);
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.tenancy
            .validate()
            .map_err(|e| GatewayError::Config(format!("Tenancy config error: {}", e)))?;

        let mut seen = std::collections::HashSet::new();
        for service in &self.services {
            service
                .validate()
                .map_err(|e| GatewayError::Config(format!("Service config error: {}", e)))?;
            if !seen.insert(service.name.as_str()) {
                return Err(GatewayError::Config(format!(
                    "Duplicate service name: {}",
                    service.name
                )));
            }
        }

        debug!("Configuration validation completed");
        Ok(())
    }
}
