//! Route registration
//!
//! Gateway-owned endpoints are registered ahead of the proxy catch-all so
//! reserved paths never reach tenant resolution through routing. Ordering
//! matters: actix matches in registration order.

pub mod admin;
pub mod health;
pub mod metrics;
pub mod proxy;
pub mod root;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root::gateway_root))
        .route("/health", web::get().to(health::gateway_health))
        .route("/metrics", web::get().to(metrics::gateway_metrics))
        .service(
            web::scope("/admin")
                .route("/tenants", web::get().to(admin::list_tenants))
                .route("/tenants/{tenant_id}/stats", web::get().to(admin::tenant_stats))
                .route(
                    "/tenants/{tenant_id}/reset-limits",
                    web::post().to(admin::reset_tenant_limits),
                ),
        )
        .route("/{service}", web::route().to(proxy::proxy_handler_bare))
        .route("/{service}/{tail:.*}", web::route().to(proxy::proxy_handler));
}
