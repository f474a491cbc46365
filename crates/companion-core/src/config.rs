//! Shared client defaults.
//!
//! The backend has no real authentication yet; every request is issued on
//! behalf of a single demo user. These constants keep the demo identity and
//! the polling/paging defaults in one place.

use std::time::Duration;

/// Fixed demo user identifier used in absence of real authentication.
pub const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Default page size when fetching conversation history.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Interval between backend health probes.
pub const HEALTH_PROBE_INTERVAL: Duration = Duration::from_secs(10);
