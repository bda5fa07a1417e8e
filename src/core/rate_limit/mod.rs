//! Per-tenant, per-service admission control

pub mod limiter;
pub mod types;

pub use limiter::{RateLimiter, WINDOW};
pub use types::AdmitDecision;
