//! Request forwarding

pub mod forwarder;
pub mod types;

pub use forwarder::ForwardingProxy;
pub use types::ProxiedResponse;
