//! Health and metrics endpoint tests

use crate::common::{config_with, gateway_app, service};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[actix_web::test]
async fn test_root_reports_configured_services() {
    let app = test::init_service(gateway_app(config_with(vec![
        service("billing", "http://127.0.0.1:1", 10),
        service("analytics", "http://127.0.0.1:1", 10),
    ])))
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "operational");
    assert_eq!(
        body["services"],
        serde_json::json!(["analytics", "billing"])
    );
}

#[actix_web::test]
async fn test_health_is_degraded_when_one_backend_is_down() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&healthy)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![
        service("billing", &healthy.uri(), 10),
        service("analytics", "http://127.0.0.1:1", 10),
    ])))
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["gateway"]["status"], "healthy");
    assert_eq!(body["overall_status"], "degraded");
    assert_eq!(body["services"]["billing"]["status"], "healthy");
    assert_eq!(body["services"]["analytics"]["status"], "unhealthy");
    assert!(body["services"]["analytics"]["error"].is_string());
}

#[actix_web::test]
async fn test_health_is_healthy_when_all_backends_answer() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        &backend.uri(),
        10,
    )])))
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["overall_status"], "healthy");
}

#[actix_web::test]
async fn test_metrics_reflect_proxied_traffic() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        &backend.uri(),
        10,
    )])))
    .await;

    for _ in 0..3 {
        test::call_service(
            &app,
            TestRequest::get()
                .uri("/billing/invoices")
                .insert_header(("Host", "acme.tause.pro"))
                .to_request(),
        )
        .await;
    }

    let resp = test::call_service(&app, TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["gateway_metrics"]["total_requests"], 3);
    assert_eq!(body["gateway_metrics"]["successful_requests"], 3);
    assert_eq!(body["gateway_metrics"]["failed_requests"], 0);
    assert_eq!(body["tenant_usage"]["acme"], 3);
    assert_eq!(body["rate_limits"]["acme"]["billing"], 3);
}

#[actix_web::test]
async fn test_gateway_endpoints_do_not_count_as_traffic() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/metrics").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["gateway_metrics"]["total_requests"], 0);
    assert_eq!(body["tenant_usage"], serde_json::json!({}));
}
