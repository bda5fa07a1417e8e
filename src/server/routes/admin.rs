//! Administrative introspection endpoints
//!
//! Tenant listing, per-tenant stats, and manual quota reset. These live under
//! a reserved path prefix and are tenant-agnostic.

use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

/// `GET /admin/tenants` — every tenant seen since startup with usage counts
pub async fn list_tenants(state: web::Data<AppState>) -> HttpResponse {
    let snapshot = state.metrics.snapshot();
    let mut tenants: Vec<String> = snapshot.tenant_usage.keys().cloned().collect();
    tenants.sort();

    HttpResponse::Ok().json(json!({
        "tenants": tenants,
        "total_tenants": snapshot.tenant_usage.len(),
        "usage_stats": snapshot.tenant_usage,
    }))
}

/// `GET /admin/tenants/{id}/stats` — usage and window fills for one tenant
pub async fn tenant_stats(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let tenant_id = path.into_inner();

    let total_requests = state
        .metrics
        .tenant_usage(&tenant_id)
        .ok_or_else(|| GatewayError::not_found(format!("Tenant {} not found", tenant_id)))?;

    let rate_limits = state.limiter.windows_for(&tenant_id).await;
    let services_used = state.limiter.services_used(&tenant_id).await;
    let settings = state.tenant_config.get_tenant_config(&tenant_id);

    Ok(HttpResponse::Ok().json(json!({
        "tenant_id": tenant_id,
        "total_requests": total_requests,
        "rate_limits": rate_limits,
        "services_used": services_used,
        "plan": settings.plan,
    })))
}

/// `POST /admin/tenants/{id}/reset-limits` — clear a tenant's rate windows
///
/// Idempotent: resetting a tenant with no prior traffic is a no-op.
pub async fn reset_tenant_limits(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let tenant_id = path.into_inner();

    state.limiter.reset(&tenant_id).await;
    info!(tenant_id, "Rate limits reset");

    HttpResponse::Ok().json(json!({
        "message": format!("Rate limits reset for tenant {}", tenant_id),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
