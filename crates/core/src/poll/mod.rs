//! Poll loop: periodic telemetry fetch with exponential backoff

pub mod backoff;
pub mod ports;
pub mod service;

pub use service::PollLoop;
