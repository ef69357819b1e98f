//! Configuration loader
//!
//! Loads application configuration from environment variables (the binary
//! runs `dotenvy` first, so a `.env` file works too).
//!
//! ## Environment Variables
//! - `SOCKWATCH_EMAIL`: account email (required)
//! - `SOCKWATCH_PASSWORD`: account password (required)
//! - `SOCKWATCH_POLL_INTERVAL_SECONDS`: seconds between successful polls
//! - `SOCKWATCH_BACKOFF_UNIT_MS`: backoff base unit in milliseconds
//! - `SOCKWATCH_MAX_ATTEMPTS`: consecutive-failure cap
//! - `SOCKWATCH_EXIT_WHEN_EXHAUSTED`: terminate after the cap (true/false)
//! - `SOCKWATCH_FETCH_MODE`: `vitals_property` or `property_set`
//! - `SOCKWATCH_METRICS_ADDR`: bind address for probes and scrape

use std::fmt::Display;
use std::str::FromStr;

use sockwatch_domain::{
    Config, Credentials, FetchMode, MetricsConfig, PollSettings, Result, SockwatchError,
};

/// Load configuration from the process environment.
///
/// # Errors
/// Returns `SockwatchError::Config` when required variables are missing or
/// any value fails to parse. Both are fatal at startup.
pub fn load() -> Result<Config> {
    let config = from_lookup(|key| std::env::var(key).ok())?;
    tracing::info!("configuration loaded from environment");
    Ok(config)
}

/// Build configuration from an arbitrary variable lookup.
///
/// The indirection keeps the parsing logic testable without touching the
/// process environment.
pub fn from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let email = required(&lookup, "SOCKWATCH_EMAIL")?;
    let password = required(&lookup, "SOCKWATCH_PASSWORD")?;

    let defaults = PollSettings::default();
    let poll = PollSettings {
        interval_seconds: parsed(&lookup, "SOCKWATCH_POLL_INTERVAL_SECONDS", defaults.interval_seconds)?,
        backoff_unit_ms: parsed(&lookup, "SOCKWATCH_BACKOFF_UNIT_MS", defaults.backoff_unit_ms)?,
        max_attempts: parsed(&lookup, "SOCKWATCH_MAX_ATTEMPTS", defaults.max_attempts)?,
        exit_when_exhausted: flag(&lookup, "SOCKWATCH_EXIT_WHEN_EXHAUSTED", defaults.exit_when_exhausted)?,
        fetch_mode: fetch_mode(&lookup, defaults.fetch_mode)?,
    };

    let metrics = MetricsConfig {
        bind_addr: lookup("SOCKWATCH_METRICS_ADDR")
            .unwrap_or_else(|| MetricsConfig::default().bind_addr),
    };

    Ok(Config { credentials: Credentials { email, password }, poll, metrics })
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| SockwatchError::Config(format!("{key} is not set")))
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|err| SockwatchError::Config(format!("Invalid {key}: {err}"))),
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref() {
        None => Ok(default),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => {
            Err(SockwatchError::Config(format!("Invalid {key}: expected true/false, got {other}")))
        }
    }
}

fn fetch_mode<F>(lookup: &F, default: FetchMode) -> Result<FetchMode>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("SOCKWATCH_FETCH_MODE").as_deref() {
        None => Ok(default),
        Some("vitals_property") => Ok(FetchMode::VitalsProperty),
        Some("property_set") => Ok(FetchMode::PropertySet),
        Some(other) => Err(SockwatchError::Config(format!(
            "Invalid SOCKWATCH_FETCH_MODE: expected vitals_property or property_set, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let lookup = vars(&[
            ("SOCKWATCH_EMAIL", "parent@example.com"),
            ("SOCKWATCH_PASSWORD", "hunter2"),
        ]);

        let config = from_lookup(lookup).unwrap();
        assert_eq!(config.credentials.email, "parent@example.com");
        assert_eq!(config.poll.interval_seconds, 2);
        assert_eq!(config.poll.max_attempts, 20);
        assert!(!config.poll.exit_when_exhausted);
        assert_eq!(config.metrics.bind_addr, "0.0.0.0:9417");
    }

    #[test]
    fn missing_credentials_are_a_config_error() {
        let err = from_lookup(vars(&[("SOCKWATCH_PASSWORD", "hunter2")])).unwrap_err();
        assert!(matches!(err, SockwatchError::Config(_)));
        assert!(err.to_string().contains("SOCKWATCH_EMAIL"));
    }

    #[test]
    fn empty_credentials_count_as_missing() {
        let lookup = vars(&[("SOCKWATCH_EMAIL", ""), ("SOCKWATCH_PASSWORD", "hunter2")]);
        assert!(from_lookup(lookup).is_err());
    }

    #[test]
    fn capped_variant_can_be_configured() {
        let lookup = vars(&[
            ("SOCKWATCH_EMAIL", "parent@example.com"),
            ("SOCKWATCH_PASSWORD", "hunter2"),
            ("SOCKWATCH_MAX_ATTEMPTS", "5"),
            ("SOCKWATCH_EXIT_WHEN_EXHAUSTED", "true"),
            ("SOCKWATCH_FETCH_MODE", "property_set"),
        ]);

        let config = from_lookup(lookup).unwrap();
        assert_eq!(config.poll.max_attempts, 5);
        assert!(config.poll.exit_when_exhausted);
        assert_eq!(config.poll.fetch_mode, FetchMode::PropertySet);
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        let lookup = vars(&[
            ("SOCKWATCH_EMAIL", "parent@example.com"),
            ("SOCKWATCH_PASSWORD", "hunter2"),
            ("SOCKWATCH_MAX_ATTEMPTS", "many"),
        ]);

        let err = from_lookup(lookup).unwrap_err();
        assert!(err.to_string().contains("SOCKWATCH_MAX_ATTEMPTS"));
    }

    #[test]
    fn garbage_fetch_mode_is_rejected() {
        let lookup = vars(&[
            ("SOCKWATCH_EMAIL", "parent@example.com"),
            ("SOCKWATCH_PASSWORD", "hunter2"),
            ("SOCKWATCH_FETCH_MODE", "sideways"),
        ]);

        assert!(from_lookup(lookup).is_err());
    }
}
