//! Gateway health endpoint
//!
//! Probes every backend concurrently and reports the aggregate. The snapshot
//! is recomputed on every call; nothing is cached, and probe traffic is
//! independent of in-flight proxy requests.

use crate::server::state::AppState;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::debug;

/// `GET /health` — full health snapshot with a gateway self-report
pub async fn gateway_health(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let snapshot = state.health.check_all().await;
    let metrics = state.metrics.snapshot();

    HttpResponse::Ok().json(json!({
        "gateway": {
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_secs": metrics.uptime_secs,
            "total_requests": metrics.total_requests,
            "success_rate": metrics.success_rate,
            "avg_response_time_ms": metrics.avg_response_time_ms,
        },
        "services": snapshot.services,
        "overall_status": snapshot.overall,
    }))
}
