use backon::ExponentialBuilder;
use std::time::Duration;

/// First retry delay.
pub const RETRY_MIN_DELAY: Duration = Duration::from_millis(250);
/// Upper bound on a single retry delay.
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(2);
/// Retries after the first attempt.
pub const RETRY_MAX_TIMES: usize = 3;

/// Backoff used by [`crate::Client`] for idempotent reads and tool writes.
///
/// Doubles from [`RETRY_MIN_DELAY`] up to [`RETRY_MAX_DELAY`] with jitter.
/// License lookups do not go through it; see [`crate::Client::get_strict`].
#[must_use]
pub fn default_backoff_builder() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(RETRY_MIN_DELAY)
        .with_max_delay(RETRY_MAX_DELAY)
        .with_max_times(RETRY_MAX_TIMES)
        .with_factor(2.0)
        .with_jitter()
}

/// Request timeout, rate limiting and any 5xx from the gateway.
#[must_use]
pub const fn is_retryable_status(code: u16) -> bool {
    matches!(code, 408 | 429 | 500..=599)
}
