//! End-to-end proxy flow tests
//!
//! Requests enter through the actix service with a tenant subdomain in the
//! Host header and exit at a wiremock backend.

use crate::common::{config_with, gateway_app, service};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::Value;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[actix_web::test]
async fn test_request_is_forwarded_with_tenant_header() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        &backend.uri(),
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/billing/invoices")
            .insert_header(("Host", "acme.tause.pro"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("X-Tenant-ID").unwrap().to_str().unwrap(),
        "acme"
    );
    assert!(resp.headers().contains_key("x-gateway-version"));
    assert!(resp.headers().contains_key("x-response-time"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn test_body_and_query_pass_through() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .and(query_param("limit", "5"))
        .and(header("x-custom", "yes"))
        .and(body_string("payload"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![service(
        "analytics",
        &backend.uri(),
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/analytics/events?limit=5")
            .insert_header(("Host", "acme.tause.pro"))
            .insert_header(("x-custom", "yes"))
            .set_payload("payload")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_quota_exhaustion_returns_429_with_retry_after() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        &backend.uri(),
        2,
    )])))
    .await;

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/billing/invoices")
                .insert_header(("Host", "acme.tause.pro"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/billing/invoices")
            .insert_header(("Host", "acme.tause.pro"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("Retry-After"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("billing")
    );
}

#[actix_web::test]
async fn test_quotas_are_independent_per_tenant() {
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

    for host in ["acme.tause.pro", "globex.tause.pro"] {
        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/billing/invoices")
                .insert_header(("Host", host))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK, "first request for {}", host);
    }
}

#[actix_web::test]
async fn test_www_host_redirects_to_bare_domain() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/billing/invoices")
            .insert_header(("Host", "www.tause.pro"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "https://tause.pro/billing/invoices"
    );
}

#[actix_web::test]
async fn test_malformed_tenant_header_redirects_to_root() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/billing/invoices")
            .insert_header(("Host", "acme.tause.pro"))
            .insert_header(("X-Tenant-ID", "Not_Valid"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "https://tause.pro"
    );
}

#[actix_web::test]
async fn test_unknown_service_returns_404() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/ghost/anything")
            .insert_header(("Host", "acme.tause.pro"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "SERVICE_NOT_FOUND");
}

#[actix_web::test]
async fn test_unreachable_backend_returns_503() {
    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        "http://127.0.0.1:1",
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/billing/invoices")
            .insert_header(("Host", "acme.tause.pro"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
}

#[actix_web::test]
async fn test_backend_error_status_is_relayed() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad input"))
        .mount(&backend)
        .await;

    let app = test::init_service(gateway_app(config_with(vec![service(
        "billing",
        &backend.uri(),
        10,
    )])))
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/billing/invoices")
            .insert_header(("Host", "acme.tause.pro"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = test::read_body(resp).await;
    assert_eq!(body, "bad input");
}
