//! # Sockwatch Infrastructure
//!
//! IO adapters for the daemon:
//! - `auth`: the federated identity exchange and session lifecycle
//! - `api`: authorized requests and domain operations against the device API
//! - `observability`: vitals gauges plus the probe/scrape HTTP surface
//! - `config`: environment-based configuration loading
//!
//! Everything here implements ports or produces types defined by
//! `sockwatch-core` and `sockwatch-domain`.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod observability;

pub use errors::InfraError;
