//! Shared test infrastructure
//!
//! Builds gateway configurations pointing at wiremock backends and wires the
//! full actix application the way the production server does.

use actix_web::{App, web};
use tenantgate::config::{Config, ServiceDescriptor};
use tenantgate::server::middleware::ResponseHeaders;
use tenantgate::server::{AppState, routes};

/// A service table entry pointing at a test backend
pub fn service(name: &str, base_url: &str, hourly_quota: u32) -> ServiceDescriptor {
    ServiceDescriptor {
        name: name.to_string(),
        base_url: base_url.to_string(),
        health_path: "/health".to_string(),
        hourly_quota,
        timeout_secs: 5,
    }
}

/// Gateway config with the default `tause.pro` tenancy and the given services
pub fn config_with(services: Vec<ServiceDescriptor>) -> Config {
    Config {
        services,
        ..Config::default()
    }
}

/// The full gateway application, identical in shape to the production server
/// apart from CORS and request tracing.
pub fn gateway_app(
    config: Config,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = web::Data::new(AppState::new(config));
    App::new()
        .app_data(state)
        .wrap(ResponseHeaders)
        .configure(routes::configure)
}
