//! Rate limiter types

/// Outcome of an admission check
#[derive(Debug, Clone)]
pub struct AdmitDecision {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Requests currently inside the trailing window (after pruning)
    pub current_count: u32,
    /// The service's hourly quota
    pub limit: u32,
    /// Admissions left in the current window
    pub remaining: u32,
    /// Seconds until the oldest window entry expires; set when rejected
    pub retry_after_secs: Option<u64>,
}

impl AdmitDecision {
    pub(super) fn admitted(current_count: u32, limit: u32) -> Self {
        Self {
            allowed: true,
            current_count,
            limit,
            remaining: limit.saturating_sub(current_count),
            retry_after_secs: None,
        }
    }

    pub(super) fn rejected(current_count: u32, limit: u32, retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            current_count,
            limit,
            remaining: 0,
            retry_after_secs: Some(retry_after_secs),
        }
    }
}
