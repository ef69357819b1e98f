//! Runtime configuration
//!
//! Typed configuration consumed at startup. Loading from the environment
//! lives in the infra crate; this module only defines the shapes and their
//! defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub credentials: Credentials,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Account credentials for the identity backend
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Which fetch the poll loop performs each iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Fetch the single vitals property directly
    VitalsProperty,
    /// Fetch the full property set and pick the vitals entry out of it
    PropertySet,
}

/// Poll loop cadence and failure policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    /// Seconds between successful iterations
    pub interval_seconds: u64,

    /// Base time unit for the exponential backoff, in milliseconds
    pub backoff_unit_ms: u64,

    /// Attempt counter cap; also bounds the backoff exponent
    pub max_attempts: u32,

    /// When true, exhausting `max_attempts` consecutive failures terminates
    /// the loop with the final error instead of retrying forever
    pub exit_when_exhausted: bool,

    pub fetch_mode: FetchMode,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_seconds: 2,
            backoff_unit_ms: 1,
            max_attempts: 20,
            exit_when_exhausted: false,
            fetch_mode: FetchMode::VitalsProperty,
        }
    }
}

/// Scrape/probe server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Bind address for the probe and scrape endpoints
    pub bind_addr: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { bind_addr: "0.0.0.0:9417".to_string() }
    }
}
