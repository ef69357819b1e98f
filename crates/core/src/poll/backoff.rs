//! Backoff law for the poll loop
//!
//! Delays grow as `unit * 2^attempt`, with the exponent bounded by
//! `max_attempts - 1` so the wait stays finite no matter how long the outage
//! lasts. No jitter: the loop is a single client against a per-account API.

use std::time::Duration;

// 2^30 * unit already exceeds any sane wait; also keeps the shift in range.
const MAX_SHIFT: u32 = 30;

/// Compute the wait before retry number `attempt` (1-based).
///
/// `attempt` increments by one per consecutive failure and resets to 1 after
/// a success; the exponent is `min(attempt, max_attempts - 1)`.
#[must_use]
pub fn backoff_delay(attempt: u32, max_attempts: u32, unit: Duration) -> Duration {
    let exponent = attempt.min(max_attempts.saturating_sub(1)).min(MAX_SHIFT);
    unit.saturating_mul(1u32 << exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_follows_the_capped_power_law() {
        let unit = Duration::from_millis(1);
        let max_attempts = 20;

        for attempt in 1..=max_attempts {
            let exponent = attempt.min(max_attempts - 1);
            assert_eq!(
                backoff_delay(attempt, max_attempts, unit),
                Duration::from_millis(1 << exponent),
                "attempt {attempt}"
            );
        }
    }

    #[test]
    fn delay_is_monotonically_non_decreasing_up_to_the_cap() {
        let unit = Duration::from_millis(1);

        let mut previous = Duration::ZERO;
        for attempt in 1..=25 {
            let delay = backoff_delay(attempt, 20, unit);
            assert!(delay >= previous, "attempt {attempt} regressed");
            previous = delay;
        }

        // Beyond the cap the delay is pinned at 2^(max_attempts - 1) units.
        assert_eq!(backoff_delay(25, 20, unit), Duration::from_millis(1 << 19));
    }

    #[test]
    fn capped_variant_tops_out_at_two_to_the_fourth() {
        let unit = Duration::from_secs(1);

        assert_eq!(backoff_delay(1, 5, unit), Duration::from_secs(2));
        assert_eq!(backoff_delay(4, 5, unit), Duration::from_secs(16));
        assert_eq!(backoff_delay(5, 5, unit), Duration::from_secs(16));
    }

    #[test]
    fn oversized_exponents_do_not_overflow() {
        let delay = backoff_delay(u32::MAX, u32::MAX, Duration::from_secs(3600));
        assert!(delay <= Duration::MAX);
    }
}
