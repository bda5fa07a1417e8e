//! Proxy catch-all handler
//!
//! Translates an actix request into a pipeline request, runs the pipeline,
//! and relays the outcome. All tenant, admission, and forwarding decisions
//! happen inside the pipeline; this handler only converts between the HTTP
//! layer and the core types.

use crate::core::pipeline::{PipelineOutcome, ProxyRequest};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

/// `ANY /{service}/{path...}` — the gateway pipeline
pub async fn proxy_handler(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (service, tail) = path.into_inner();
    run_pipeline(req, service, format!("/{}", tail), body, state).await
}

/// `ANY /{service}` — same pipeline, empty service path
pub async fn proxy_handler_bare(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let service = path.into_inner();
    run_pipeline(req, service, "/".to_string(), body, state).await
}

async fn run_pipeline(
    req: HttpRequest,
    service: String,
    service_path: String,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let host = req.connection_info().host().to_string();

    let header_tenant = req
        .headers()
        .get("x-tenant-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let query_tenant = url::form_urlencoded::parse(req.query_string().as_bytes())
        .find(|(key, _)| key == "tenant_id")
        .map(|(_, value)| value.into_owned());

    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|_| GatewayError::internal("unsupported method"))?;

    let mut headers = reqwest::header::HeaderMap::new();
    for (name, value) in req.headers() {
        if let (Ok(name), Ok(value)) = (
            reqwest::header::HeaderName::from_bytes(name.as_str().as_bytes()),
            reqwest::header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            headers.append(name, value);
        }
    }

    let query = if req.query_string().is_empty() {
        None
    } else {
        Some(req.query_string().to_string())
    };

    let request = ProxyRequest {
        host,
        path: req.path().to_string(),
        service,
        service_path,
        method,
        headers,
        body: body.into(),
        query,
        header_tenant,
        query_tenant,
    };

    match state.pipeline.handle(request).await? {
        PipelineOutcome::Redirect(location) => Ok(HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, location))
            .finish()),
        PipelineOutcome::Forwarded {
            tenant_id,
            response,
        } => {
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut builder = HttpResponse::build(status);

            for (name, value) in response.headers.iter() {
                if let (Ok(name), Ok(value)) = (
                    HeaderName::from_bytes(name.as_str().as_bytes()),
                    HeaderValue::from_bytes(value.as_bytes()),
                ) {
                    builder.append_header((name, value));
                }
            }
            if let Some(tenant_id) = tenant_id {
                builder.insert_header(("X-Tenant-ID", tenant_id));
            }

            Ok(builder.body(response.body))
        }
    }
}
