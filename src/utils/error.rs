//! Error handling for the gateway
//!
//! A single error enum covers the whole request path. Forwarding failures are
//! translated 1:1 into HTTP status codes by the `ResponseError` impl; quota
//! exhaustion is expected traffic and is never logged as an error.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Per-tenant quota exhausted for a service
    #[error("Rate limit exceeded for {service} service")]
    AdmissionRejected {
        /// Tenant whose quota is exhausted
        tenant: String,
        /// Service the request was addressed to
        service: String,
        /// Seconds until the oldest window entry expires
        retry_after_secs: Option<u64>,
    },

    /// Request addressed to a service that is not registered
    #[error("Service {0} not found")]
    UnknownService(String),

    /// Upstream did not answer within the service's configured timeout
    #[error("Service {service} timeout")]
    UpstreamTimeout {
        /// Service that timed out
        service: String,
    },

    /// Upstream connection could not be established
    #[error("Service {service} unavailable")]
    UpstreamUnavailable {
        /// Service that could not be reached
        service: String,
    },

    /// Other upstream transport failures
    #[error("Error forwarding to {service}: {message}")]
    Upstream {
        /// Service the request was addressed to
        service: String,
        /// Underlying transport error
        message: String,
    },

    /// Not found errors (admin introspection)
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal server errors
    #[error("Internal gateway error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Machine-readable error code carried in the response body
    fn error_code(&self) -> &'static str {
        match self {
            GatewayError::AdmissionRejected { .. } => "RATE_LIMIT_EXCEEDED",
            GatewayError::UnknownService(_) => "SERVICE_NOT_FOUND",
            GatewayError::UpstreamTimeout { .. } => "UPSTREAM_TIMEOUT",
            GatewayError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            GatewayError::Upstream { .. } => "UPSTREAM_ERROR",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            GatewayError::AdmissionRejected { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::UnknownService(_) => StatusCode::NOT_FOUND,
            GatewayError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.status_code().is_server_error()
            && !matches!(
                self,
                GatewayError::UpstreamTimeout { .. }
                    | GatewayError::UpstreamUnavailable { .. }
                    | GatewayError::Upstream { .. }
            ) {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        let mut builder = HttpResponse::build(self.status_code());
        if let GatewayError::AdmissionRejected {
            retry_after_secs: Some(secs),
            ..
        } = self
        {
            builder.insert_header(("Retry-After", secs.to_string()));
        }
        builder.json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
