//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::health::HealthAggregator;
use crate::core::pipeline::GatewayPipeline;
use crate::core::proxy::ForwardingProxy;
use crate::core::rate_limit::RateLimiter;
use crate::core::registry::ServiceRegistry;
use crate::core::tenant::{
    DefaultTenantConfig, StaticDomainTable, TenantConfigSource, TenantResolver, TenantValidator,
};
use crate::monitoring::MetricsCollector;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so every worker thread shares the same
/// rate-limit windows and metrics counters.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Backend service table
    pub registry: Arc<ServiceRegistry>,
    /// Request pipeline
    pub pipeline: Arc<GatewayPipeline>,
    /// Backend health prober
    pub health: Arc<HealthAggregator>,
    /// Process-wide metrics
    pub metrics: Arc<MetricsCollector>,
    /// Admission control state, shared with the pipeline
    pub limiter: Arc<RateLimiter>,
    /// Per-tenant settings accessor
    pub tenant_config: Arc<dyn TenantConfigSource>,
}

impl AppState {
    /// Wire up all gateway components from configuration
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(ServiceRegistry::new(config.services.clone()));
        let metrics = Arc::new(MetricsCollector::new());
        let limiter = Arc::new(RateLimiter::new(Arc::clone(&registry)));

        let domains = Arc::new(StaticDomainTable::new(config.tenancy.custom_domains.clone()));
        let resolver = TenantResolver::new(
            config.tenancy.base_domain.clone(),
            config.tenancy.redirect_scheme.clone(),
            domains,
        );
        let validator =
            TenantValidator::new(&config.tenancy.base_domain, &config.tenancy.redirect_scheme);
        let proxy = ForwardingProxy::new(Arc::clone(&registry), Arc::clone(&metrics));

        let pipeline = Arc::new(GatewayPipeline::new(
            resolver,
            validator,
            Arc::clone(&limiter),
            proxy,
            Arc::clone(&metrics),
            Arc::clone(&registry),
        ));
        let health = Arc::new(HealthAggregator::new(Arc::clone(&registry)));

        Self {
            config: Arc::new(config),
            registry,
            pipeline,
            health,
            metrics,
            limiter,
            tenant_config: Arc::new(DefaultTenantConfig),
        }
    }
}
