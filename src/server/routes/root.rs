//! Gateway info endpoint

use crate::server::state::AppState;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// `GET /` — gateway identity and the configured service table
pub async fn gateway_root(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "Multi-Tenant API Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "services": state.registry.names(),
        "build": {
            "git_hash": env!("GIT_HASH"),
            "build_time": env!("BUILD_TIME"),
        },
    }))
}
