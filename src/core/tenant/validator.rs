//! Tenant validator
//!
//! Syntactic check only: system tenants always pass, everything else must
//! match the tenant-id grammar. A production deployment replaces the grammar
//! check with a registry lookup without changing this contract.

use super::TenantContext;
use once_cell::sync::Lazy;
use regex::Regex;

// Lowercase alphanumerics and hyphens; length is checked separately
static TENANT_GRAMMAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("tenant grammar regex"));

/// Validation verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Tenant accepted, continue the pipeline
    Valid,
    /// Tenant rejected; send the caller back to the platform root
    Redirect(String),
}

/// Validates resolved tenant contexts
pub struct TenantValidator {
    root_url: String,
}

impl TenantValidator {
    /// Create a validator redirecting rejects to the bare base domain
    pub fn new(base_domain: &str, scheme: &str) -> Self {
        Self {
            root_url: format!("{}://{}", scheme, base_domain),
        }
    }

    /// Validate a resolved context
    pub fn validate(&self, context: &TenantContext) -> Verdict {
        if context.is_system {
            return Verdict::Valid;
        }
        if context.tenant_id.len() >= 2 && TENANT_GRAMMAR.is_match(&context.tenant_id) {
            return Verdict::Valid;
        }
        Verdict::Redirect(self.root_url.clone())
    }
}
