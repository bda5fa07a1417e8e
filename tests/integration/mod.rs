//! Integration tests
//!
//! Each module exercises one slice of the HTTP surface against wiremock
//! backends.

mod admin_api;
mod gateway_flow;
mod observability;
