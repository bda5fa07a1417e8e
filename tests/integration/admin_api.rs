//! Admin endpoint tests

use crate::common::{config_with, gateway_app, service};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::Value;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[actix_web::test]
async fn test_tenant_list_starts_empty() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    let resp =
        test::call_service(&app, TestRequest::get().uri("/admin/tenants").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_tenants"], 0);
    assert_eq!(body["tenants"], serde_json::json!([]));
}

#[actix_web::test]
async fn test_tenants_appear_after_traffic() {
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

    for host in ["globex.tause.pro", "acme.tause.pro"] {
        test::call_service(
            &app,
            TestRequest::get()
                .uri("/billing/invoices")
                .insert_header(("Host", host))
                .to_request(),
        )
        .await;
    }

    let resp =
        test::call_service(&app, TestRequest::get().uri("/admin/tenants").to_request()).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["total_tenants"], 2);
    assert_eq!(body["tenants"], serde_json::json!(["acme", "globex"]));
    assert_eq!(body["usage_stats"]["acme"], 1);
}

#[actix_web::test]
async fn test_stats_for_unseen_tenant_is_404() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/admin/tenants/ghost/stats")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_tenant_stats_report_windows_and_services() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![
        service("billing", &backend.uri(), 10),
        service("analytics", &backend.uri(), 10),
    ])))
    .await;

    for uri in ["/billing/a", "/billing/b", "/analytics/c"] {
        test::call_service(
            &app,
            TestRequest::get()
                .uri(uri)
                .insert_header(("Host", "acme.tause.pro"))
                .to_request(),
        )
        .await;
    }

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/admin/tenants/acme/stats")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["tenant_id"], "acme");
    assert_eq!(body["total_requests"], 3);
    assert_eq!(body["rate_limits"]["billing"], 2);
    assert_eq!(body["rate_limits"]["analytics"], 1);
    assert_eq!(
        body["services_used"],
        serde_json::json!(["analytics", "billing"])
    );
    // Default tenant-config source carries no plan
    assert!(body["plan"].is_null());
}

#[actix_web::test]
async fn test_reset_restores_quota() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        &backend.uri(),
        1,
    )])))
    .await;

    let request = || {
        TestRequest::get()
            .uri("/billing/invoices")
            .insert_header(("Host", "acme.tause.pro"))
            .to_request()
    };

    assert_eq!(
        test::call_service(&app, request()).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        test::call_service(&app, request()).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/admin/tenants/acme/reset-limits")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("acme"));

    assert_eq!(
        test::call_service(&app, request()).await.status(),
        StatusCode::OK
    );
}

#[actix_web::test]
async fn test_reset_for_unseen_tenant_is_ok() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/admin/tenants/ghost/reset-limits")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}
