//! # Sockwatch Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The resilient poll loop and its backoff law
//! - Port/adapter interfaces (traits) for the telemetry source and the
//!   observability sink
//!
//! ## Architecture Principles
//! - Only depends on `sockwatch-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod poll;

// Re-export specific items to avoid ambiguity
pub use poll::ports::{VitalsSink, VitalsSource};
pub use poll::PollLoop;
