//! Tenant resolver
//!
//! Derives a tenant context from host, path, header, and query parameter, in
//! that priority order. Resolution is pure: it touches no rate-limit or
//! metrics state and is deterministic for a given input.

use super::{Resolution, ResolutionSource, SharedDomainLookup, TenantContext};
use tracing::debug;

/// Path prefixes that never carry a tenant
const RESERVED_PREFIXES: &[&str] = &[
    "/health",
    "/metrics",
    "/admin",
    "/static",
    "/assets",
    "/.well-known",
    "/favicon.ico",
    "/robots.txt",
];

/// Paths on the bare base domain that belong to the application subdomain
const APP_REDIRECT_PATHS: &[&str] = &["/app", "/login", "/signup", "/dashboard"];

/// Resolves tenant identity per request
pub struct TenantResolver {
    base_domain: String,
    scheme: String,
    domains: SharedDomainLookup,
}

impl TenantResolver {
    /// Create a resolver for the given base domain
    pub fn new(base_domain: impl Into<String>, scheme: impl Into<String>, domains: SharedDomainLookup) -> Self {
        Self {
            base_domain: base_domain.into(),
            scheme: scheme.into(),
            domains,
        }
    }

    /// Resolve a tenant from request parts
    ///
    /// `header_tenant` is the `X-Tenant-ID` header value and `query_tenant`
    /// the `tenant_id` query parameter, both already extracted by the caller.
    pub fn resolve(
        &self,
        host: &str,
        path: &str,
        header_tenant: Option<&str>,
        query_tenant: Option<&str>,
    ) -> Resolution {
        if Self::is_reserved_path(path) {
            return Resolution::Skip;
        }

        if let Some(id) = header_tenant.filter(|id| !id.is_empty()) {
            return Resolution::Context(TenantContext::new(id, ResolutionSource::Header));
        }
        if let Some(id) = query_tenant.filter(|id| !id.is_empty()) {
            return Resolution::Context(TenantContext::new(id, ResolutionSource::Query));
        }

        let host = strip_port(host);

        if host == self.base_domain {
            if APP_REDIRECT_PATHS.contains(&path) {
                return Resolution::Redirect(format!(
                    "{}://app.{}{}",
                    self.scheme, self.base_domain, path
                ));
            }
            return Resolution::Context(TenantContext::new("landing", ResolutionSource::Root));
        }

        if let Some(subdomain) = self.extract_subdomain(host) {
            // www never yields a context, only a redirect to the bare domain
            if subdomain == "www" {
                return Resolution::Redirect(format!(
                    "{}://{}{}",
                    self.scheme, self.base_domain, path
                ));
            }
            if let Some(tenant_id) = system_subdomain(subdomain) {
                return Resolution::Context(TenantContext::new(
                    tenant_id,
                    ResolutionSource::SystemSubdomain,
                ));
            }
            return Resolution::Context(TenantContext::new(
                subdomain,
                ResolutionSource::TenantSubdomain,
            ));
        }

        // Candidate custom domain; a lookup miss is never a hard failure
        match self.domains.resolve_tenant_from_host(host) {
            Some(tenant_id) => {
                debug!(host, tenant_id, "Resolved custom domain");
                Resolution::Context(TenantContext::new(tenant_id, ResolutionSource::CustomDomain))
            }
            None => Resolution::Redirect(format!(
                "{}://app.{}{}",
                self.scheme, self.base_domain, path
            )),
        }
    }

    /// Whether the path is tenant-agnostic infrastructure
    pub fn is_reserved_path(path: &str) -> bool {
        RESERVED_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }

    /// Extract the label(s) preceding the base domain, if the host is under it
    fn extract_subdomain<'a>(&self, host: &'a str) -> Option<&'a str> {
        let suffix = host.strip_suffix(&self.base_domain)?;
        let subdomain = suffix.strip_suffix('.')?;
        if subdomain.is_empty() {
            None
        } else {
            Some(subdomain)
        }
    }
}

/// Map a reserved infrastructure subdomain to its system tenant
fn system_subdomain(subdomain: &str) -> Option<&'static str> {
    match subdomain {
        "api" => Some("api-service"),
        "admin" => Some("admin-panel"),
        "docs" => Some("documentation"),
        "app" => Some("default"),
        "cdn" => Some("static-assets"),
        "status" => Some("status-page"),
        "blog" => Some("blog-content"),
        "help" => Some("help-center"),
        _ => None,
    }
}

/// Drop an explicit port from a host header value
fn strip_port(host: &str) -> &str {
    host.rsplit_once(':')
        .map(|(name, port)| {
            if port.chars().all(|c| c.is_ascii_digit()) {
                name
            } else {
                host
            }
        })
        .unwrap_or(host)
}
