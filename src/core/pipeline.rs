//! Gateway request pipeline
//!
//! One request lifecycle: resolve -> validate -> rate-limit -> forward.
//! Each stage either moves forward or terminates with a redirect or an error;
//! there are no retries inside the pipeline. Tenant-agnostic paths skip the
//! tenant stages entirely and carry no context.

use crate::core::proxy::{ForwardingProxy, ProxiedResponse};
use crate::core::rate_limit::RateLimiter;
use crate::core::registry::ServiceRegistry;
use crate::core::tenant::{Resolution, TenantResolver, TenantValidator, Verdict};
use crate::monitoring::MetricsCollector;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use tracing::debug;

/// Everything the pipeline needs from an inbound request
#[derive(Debug)]
pub struct ProxyRequest {
    /// Host header value, possibly with a port
    pub host: String,
    /// Full request path including the service segment
    pub path: String,
    /// First path segment, naming the target service
    pub service: String,
    /// Remainder of the path forwarded upstream, starting with `/`
    pub service_path: String,
    /// Request method
    pub method: reqwest::Method,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Bytes,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    /// `X-Tenant-ID` header value
    pub header_tenant: Option<String>,
    /// `tenant_id` query parameter value
    pub query_tenant: Option<String>,
}

/// Terminal result of a pipeline run that produced a response
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Request was admitted and forwarded upstream
    Forwarded {
        /// Resolved tenant, absent on tenant-agnostic paths
        tenant_id: Option<String>,
        /// Upstream response to relay
        response: ProxiedResponse,
    },
    /// Request terminated with a redirect; no tenant context survives
    Redirect(String),
}

/// Orchestrates the per-request stages
pub struct GatewayPipeline {
    resolver: TenantResolver,
    validator: TenantValidator,
    limiter: Arc<RateLimiter>,
    proxy: ForwardingProxy,
    metrics: Arc<MetricsCollector>,
    registry: Arc<ServiceRegistry>,
}

impl GatewayPipeline {
    /// Assemble the pipeline from its stages
    pub fn new(
        resolver: TenantResolver,
        validator: TenantValidator,
        limiter: Arc<RateLimiter>,
        proxy: ForwardingProxy,
        metrics: Arc<MetricsCollector>,
        registry: Arc<ServiceRegistry>,
    ) -> Self {
        Self {
            resolver,
            validator,
            limiter,
            proxy,
            metrics,
            registry,
        }
    }

    /// Run one request through the pipeline
    pub async fn handle(&self, request: ProxyRequest) -> Result<PipelineOutcome> {
        let resolution = self.resolver.resolve(
            &request.host,
            &request.path,
            request.header_tenant.as_deref(),
            request.query_tenant.as_deref(),
        );

        let context = match resolution {
            Resolution::Redirect(location) => {
                debug!(location, "Resolution redirect");
                return Ok(PipelineOutcome::Redirect(location));
            }
            // Tenant-agnostic path: forward with no context and no bookkeeping
            Resolution::Skip => {
                let response = self.dispatch(&request).await?;
                return Ok(PipelineOutcome::Forwarded {
                    tenant_id: None,
                    response,
                });
            }
            Resolution::Context(context) => context,
        };

        // Usage counts from the moment a tenant is resolved, whatever follows
        self.metrics.record_tenant(&context.tenant_id);

        if let Verdict::Redirect(location) = self.validator.validate(&context) {
            debug!(tenant_id = %context.tenant_id, "Validation redirect");
            return Ok(PipelineOutcome::Redirect(location));
        }

        // Unknown services fall through to the forward stage for its 404;
        // admission must not touch window state for them
        if self.registry.get(&request.service).is_some() {
            let decision = self
                .limiter
                .admit(&context.tenant_id, &request.service)
                .await;
            if !decision.allowed {
                return Err(GatewayError::AdmissionRejected {
                    tenant: context.tenant_id,
                    service: request.service,
                    retry_after_secs: decision.retry_after_secs,
                });
            }
        }

        let response = self.dispatch(&request).await?;
        Ok(PipelineOutcome::Forwarded {
            tenant_id: Some(context.tenant_id),
            response,
        })
    }

    async fn dispatch(&self, request: &ProxyRequest) -> Result<ProxiedResponse> {
        self.proxy
            .forward(
                &request.service,
                &request.service_path,
                request.method.clone(),
                request.headers.clone(),
                request.body.clone(),
                request.query.as_deref(),
            )
            .await
    }
}
