//! Port interfaces for the poll loop
//!
//! These traits define the boundaries between the loop's business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use sockwatch_domain::{RealTimeVitals, Result};

/// Trait for fetching the latest telemetry for the watched device
#[async_trait]
pub trait VitalsSource: Send {
    /// Fetch the most recent vitals record
    async fn latest_vitals(&mut self) -> Result<RealTimeVitals>;

    /// Tell the device cloud an observer is actively watching
    async fn mark_active(&mut self) -> Result<()>;
}

/// Trait for publishing a vitals record to the observability sink
///
/// Implementations must be safe to call while a scrape handler concurrently
/// reads current values; gauge semantics are last-write-wins and reads never
/// block writers.
pub trait VitalsSink: Send + Sync {
    /// Record one vitals snapshot
    fn record(&self, vitals: &RealTimeVitals);
}
