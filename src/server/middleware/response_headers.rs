//! Gateway response headers
//!
//! Stamps every response with the gateway version and the wall-clock time the
//! request spent inside the gateway.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

const GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Middleware adding `X-Gateway-Version` and `X-Response-Time`
#[derive(Default)]
pub struct ResponseHeaders;

impl<S, B> Transform<S, ServiceRequest> for ResponseHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ResponseHeadersService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResponseHeadersService { service }))
    }
}

/// Service implementation for the response-header middleware
pub struct ResponseHeadersService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ResponseHeadersService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-gateway-version"),
                HeaderValue::from_static(GATEWAY_VERSION),
            );
            if let Ok(value) = HeaderValue::from_str(&format!("{:.6}", start.elapsed().as_secs_f64()))
            {
                headers.insert(HeaderName::from_static("x-response-time"), value);
            }

            Ok(res)
        })
    }
}
