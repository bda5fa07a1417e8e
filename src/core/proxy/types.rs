//! Proxy types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Response relayed back from an upstream service
#[derive(Debug)]
pub struct ProxiedResponse {
    /// Upstream HTTP status code
    pub status: u16,
    /// Upstream headers with framing headers already stripped
    pub headers: HeaderMap,
    /// Upstream body, passed through verbatim
    pub body: Bytes,
    /// Time from dispatch to full body receipt
    pub latency: Duration,
}
