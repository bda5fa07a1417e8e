//! Tenant resolution and validation
//!
//! A tenant context is derived once per request, never mutated, and dropped
//! at request end. Resolution never hard-fails: anything unresolvable turns
//! into a redirect toward the platform's default application subdomain.

pub mod resolver;
pub mod validator;

pub use resolver::TenantResolver;
pub use validator::{TenantValidator, Verdict};

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// How a tenant id was derived from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// `X-Tenant-ID` request header
    Header,
    /// `tenant_id` query parameter
    Query,
    /// Reserved infrastructure subdomain (api, admin, docs, ...)
    SystemSubdomain,
    /// Customer subdomain under the base domain
    TenantSubdomain,
    /// Custom domain mapped through the domain lookup collaborator
    CustomDomain,
    /// Bare base domain (landing tenant)
    Root,
}

/// Per-request tenant context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantContext {
    /// Opaque tenant identifier
    pub tenant_id: String,
    /// Where the id came from
    pub source: ResolutionSource,
    /// Reserved infrastructure tenant, exempt from validation
    pub is_system: bool,
}

impl TenantContext {
    /// Build a context, deriving the system flag from the id
    pub fn new(tenant_id: impl Into<String>, source: ResolutionSource) -> Self {
        let tenant_id = tenant_id.into();
        let is_system = is_system_tenant(&tenant_id);
        Self {
            tenant_id,
            source,
            is_system,
        }
    }
}

/// Reserved tenant ids tied to infrastructure subdomains rather than customers
pub const SYSTEM_TENANTS: &[&str] = &[
    "api-service",
    "admin-panel",
    "documentation",
    "default",
    "landing",
    "static-assets",
    "status-page",
    "blog-content",
    "help-center",
];

/// Whether an id belongs to the reserved system-tenant set
pub fn is_system_tenant(tenant_id: &str) -> bool {
    SYSTEM_TENANTS.contains(&tenant_id)
}

/// Outcome of the resolution stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Tenant resolved, continue the pipeline
    Context(TenantContext),
    /// Terminal redirect, no tenant context created
    Redirect(String),
    /// Tenant-agnostic path, resolution skipped entirely
    Skip,
}

/// Custom-domain lookup collaborator
///
/// Production deployments back this with the domain registry; the gateway
/// core only consumes it as a read-only lookup.
pub trait DomainLookup: Send + Sync {
    /// Map a host outside the base domain to a tenant id, if registered
    fn resolve_tenant_from_host(&self, host: &str) -> Option<String>;
}

/// Static in-memory domain table, loaded from configuration
#[derive(Debug, Default)]
pub struct StaticDomainTable {
    table: HashMap<String, String>,
}

impl StaticDomainTable {
    /// Build from a host -> tenant map
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }
}

impl DomainLookup for StaticDomainTable {
    fn resolve_tenant_from_host(&self, host: &str) -> Option<String> {
        self.table.get(host).cloned()
    }
}

/// Per-tenant settings accessor collaborator
pub trait TenantConfigSource: Send + Sync {
    /// Fetch settings for a tenant; defaults when nothing is registered
    fn get_tenant_config(&self, tenant_id: &str) -> TenantSettings;
}

/// Settings attached to a tenant
#[derive(Debug, Clone, Default, Serialize)]
pub struct TenantSettings {
    /// Tenant id the settings belong to
    pub tenant_id: String,
    /// Billing plan label
    pub plan: Option<String>,
}

/// Default accessor returning empty settings for every tenant
#[derive(Debug, Default)]
pub struct DefaultTenantConfig;

impl TenantConfigSource for DefaultTenantConfig {
    fn get_tenant_config(&self, tenant_id: &str) -> TenantSettings {
        TenantSettings {
            tenant_id: tenant_id.to_string(),
            plan: None,
        }
    }
}

/// Shared handle to a domain lookup implementation
pub type SharedDomainLookup = Arc<dyn DomainLookup>;
