//! Constants for the download module (timeouts, attempt budget).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes covers the largest 4k renditions).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Default transfer attempts per item. The final attempt downgrades to the
/// fallback link when the budget allows more than one attempt.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
