//! Forwarding proxy
//!
//! Relays admitted requests to their backend service with the service's
//! configured timeout. Timeouts and unreachable backends surface as distinct
//! error kinds, and every attempt updates the metrics collector exactly once
//! before the result propagates.

use super::types::ProxiedResponse;
use crate::core::registry::ServiceRegistry;
use crate::monitoring::{MetricsCollector, Outcome};
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

/// Relays requests to backend services
pub struct ForwardingProxy {
    registry: Arc<ServiceRegistry>,
    metrics: Arc<MetricsCollector>,
    client: reqwest::Client,
}

impl ForwardingProxy {
    /// Create a proxy over the given registry
    pub fn new(registry: Arc<ServiceRegistry>, metrics: Arc<MetricsCollector>) -> Self {
        Self {
            registry,
            metrics,
            client: reqwest::Client::new(),
        }
    }

    /// Forward a request to the named service
    ///
    /// `path` is the remainder after the service segment and must start with
    /// `/`. Hop-by-hop request headers are stripped before dispatch; framing
    /// headers are stripped from the response because the gateway recomputes
    /// them.
    pub async fn forward(
        &self,
        service: &str,
        path: &str,
        method: reqwest::Method,
        mut headers: HeaderMap,
        body: Bytes,
        query: Option<&str>,
    ) -> Result<ProxiedResponse> {
        let Some(descriptor) = self.registry.get(service) else {
            error!(service, "Request for unregistered service");
            return Err(GatewayError::UnknownService(service.to_string()));
        };

        headers.remove(HOST);
        headers.remove(CONTENT_LENGTH);

        let mut url = format!("{}{}", descriptor.base_url.trim_end_matches('/'), path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let mut request = self
            .client
            .request(method, &url)
            .headers(headers)
            .timeout(descriptor.timeout());
        if !body.is_empty() {
            request = request.body(body);
        }

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let latency = start.elapsed();
                self.metrics.record(Outcome::Failure, latency);
                return Err(classify_send_error(service, e));
            }
        };

        let status = response.status().as_u16();
        let mut response_headers = response.headers().clone();
        response_headers.remove(CONTENT_LENGTH);
        response_headers.remove(TRANSFER_ENCODING);

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let latency = start.elapsed();
                self.metrics.record(Outcome::Failure, latency);
                return Err(classify_send_error(service, e));
            }
        };
        let latency = start.elapsed();

        let outcome = if status < 400 {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        self.metrics.record(outcome, latency);

        Ok(ProxiedResponse {
            status,
            headers: response_headers,
            body,
            latency,
        })
    }
}

/// Map a transport error to its gateway error kind
fn classify_send_error(service: &str, e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        warn!(service, "Upstream timeout");
        GatewayError::UpstreamTimeout {
            service: service.to_string(),
        }
    } else if e.is_connect() {
        warn!(service, "Upstream unreachable");
        GatewayError::UpstreamUnavailable {
            service: service.to_string(),
        }
    } else {
        warn!(service, error = %e, "Upstream transport error");
        GatewayError::Upstream {
            service: service.to_string(),
            message: e.to_string(),
        }
    }
}
