//! Application constants
//!
//! Names of the device properties the daemon reads and writes.

/// Property whose value payload carries the aggregate vitals record.
pub const REAL_TIME_VITALS: &str = "REAL_TIME_VITALS";

/// Property that receives the "app is watching" heartbeat datapoint.
pub const APP_ACTIVE: &str = "APP_ACTIVE";

/// Datapoint value posted to [`APP_ACTIVE`] after each successful poll.
pub const APP_ACTIVE_VALUE: i64 = 1;
