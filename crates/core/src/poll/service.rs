//! Poll loop service - core business logic
//!
//! Drives the fetch → record → heartbeat cycle forever. Failures never
//! panic and never hot-loop: every failed iteration waits out the capped
//! exponential backoff before the next try, and a deployment can opt into
//! terminating once the retry budget is spent.

use std::time::Duration;

use sockwatch_domain::{PollSettings, Result};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use super::backoff::backoff_delay;
use super::ports::{VitalsSink, VitalsSource};

/// Periodic telemetry poller
pub struct PollLoop<S, K> {
    source: S,
    sink: K,
    settings: PollSettings,
}

impl<S, K> PollLoop<S, K>
where
    S: VitalsSource,
    K: VitalsSink,
{
    /// Create a new poll loop over a telemetry source and a sink
    pub fn new(source: S, sink: K, settings: PollSettings) -> Self {
        Self { source, sink, settings }
    }

    /// Run the loop.
    ///
    /// Returns only in the `exit_when_exhausted` variant, with the error of
    /// the final failed attempt; otherwise the future never resolves and the
    /// process ends by external termination.
    ///
    /// The attempt counter starts at 1, grows by one per consecutive
    /// failure up to `max_attempts`, and resets to 1 after any success.
    /// Heartbeat failures are logged and do not touch the counter.
    pub async fn run(mut self) -> Result<()> {
        let interval = Duration::from_secs(self.settings.interval_seconds);
        let unit = Duration::from_millis(self.settings.backoff_unit_ms);
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt: u32 = 1;

        loop {
            match self.source.latest_vitals().await {
                Ok(vitals) => {
                    attempt = 1;
                    debug!(
                        heart_rate = vitals.heart_rate,
                        oxygen = vitals.oxygen_saturation,
                        "recorded vitals sample"
                    );
                    self.sink.record(&vitals);

                    if let Err(err) = self.source.mark_active().await {
                        warn!(error = %err, "heartbeat update failed");
                    }

                    sleep(interval).await;
                }
                Err(err) => {
                    if self.settings.exit_when_exhausted && attempt >= max_attempts {
                        error!(error = %err, attempts = attempt, "retry budget exhausted; giving up");
                        return Err(err);
                    }

                    let delay = backoff_delay(attempt, max_attempts, unit);
                    warn!(
                        error = %err,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "telemetry fetch failed; backing off"
                    );
                    sleep(delay).await;
                    attempt = attempt.saturating_add(1).min(max_attempts);
                }
            }
        }
    }
}
