//! Observability surface
//!
//! - [`gauges::VitalsGauges`]: one gauge per telemetry channel, registered
//!   on an explicitly constructed Prometheus recorder
//! - [`server`]: the probe and scrape HTTP endpoints

pub mod gauges;
pub mod server;

pub use gauges::VitalsGauges;
pub use server::{router, serve};
