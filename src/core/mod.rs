//! Core gateway logic
//!
//! Leaf-first: the registry is read-only at request time, the tenant stages
//! are pure, and all mutable state lives behind the rate limiter and the
//! metrics collector.

pub mod health;
pub mod pipeline;
pub mod proxy;
pub mod rate_limit;
pub mod registry;
pub mod tenant;

pub use health::{HealthAggregator, HealthSnapshot};
pub use pipeline::{GatewayPipeline, PipelineOutcome, ProxyRequest};
pub use proxy::{ForwardingProxy, ProxiedResponse};
pub use rate_limit::RateLimiter;
pub use registry::ServiceRegistry;
pub use tenant::{TenantContext, TenantResolver, TenantValidator};
