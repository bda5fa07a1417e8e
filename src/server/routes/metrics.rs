//! Gateway metrics endpoint

use crate::server::state::AppState;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::debug;

/// `GET /metrics` — counters, per-tenant usage, and current window fills
pub async fn gateway_metrics(state: web::Data<AppState>) -> HttpResponse {
    debug!("Metrics requested");

    let snapshot = state.metrics.snapshot();
    let tenant_usage = snapshot.tenant_usage.clone();
    let rate_limits = state.limiter.all_windows().await;

    HttpResponse::Ok().json(json!({
        "gateway_metrics": snapshot,
        "tenant_usage": tenant_usage,
        "rate_limits": rate_limits,
    }))
}
