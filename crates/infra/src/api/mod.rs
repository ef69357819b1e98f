//! Authorized device API access
//!
//! - [`executor::RequestExecutor`]: one authorized request with the
//!   single-reauth-on-401 contract
//! - [`client::TelemetryClient`]: domain operations built on the executor
//! - [`source::DeviceVitalsSource`]: adapter from the client to the core
//!   poll-loop port

pub mod client;
pub mod executor;
pub mod source;

pub use client::TelemetryClient;
pub use executor::{ApiEndpoints, ApiHost, RequestExecutor};
pub use source::DeviceVitalsSource;
