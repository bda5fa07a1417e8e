//! # TenantGate
//!
//! Multi-tenant request gateway for subdomain-based platforms.
//!
//! The gateway sits in front of a set of backend services and, for every
//! request, resolves the owning tenant from the host, header, or query
//! string, validates the tenant identifier, enforces per-tenant hourly
//! quotas, and forwards the request to the matching backend. It also
//! exposes health, metrics, and admin endpoints of its own.
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use tenantgate::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config);
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::pipeline::{GatewayPipeline, PipelineOutcome, ProxyRequest};
pub use core::registry::ServiceRegistry;
pub use core::tenant::{Resolution, TenantContext, TenantResolver};

use tracing::info;

/// The assembled gateway: configuration plus a ready-to-run HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Self {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(config.clone());

        Self { config, server }
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting TenantGate");
        info!(
            services = self.config.services.len(),
            base_domain = %self.config.tenancy.base_domain,
            "Configuration loaded"
        );

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
