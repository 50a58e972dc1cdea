//! Delay policy between feed requests.
//!
//! The feed is a long-poll endpoint, so a successful response is followed
//! immediately by the next request. Every path is still clamped to the
//! configured floor, measured from the start of the previous request, so a
//! server that answers instantly cannot push us past its rate limit.
//!
//! | Previous result            | Delay                                    |
//! |----------------------------|------------------------------------------|
//! | `Event` / `Empty`          | none                                     |
//! | `RateLimited(Some(secs))`  | `secs` + jitter in `[0, jitter)`         |
//! | `RateLimited(None)`        | `rate_limit_default_ms`                  |
//! | `HttpError` / `Malformed`  | `error_delay_ms`                         |
//! | `Timeout`                  | `timeout_delay_ms`                       |
//! | transport / loop failure   | `failure_delay_ms`                       |

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::port::outbound::feed::PollResult;

/// Backoff configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackoffConfig {
    /// Minimum time between the starts of two consecutive requests (milliseconds).
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Delay after a 429 without a usable `Retry-After` (milliseconds).
    #[serde(default = "default_rate_limit_default_ms")]
    pub rate_limit_default_ms: u64,
    /// Upper bound (exclusive) of the jitter added to `Retry-After` (milliseconds).
    #[serde(default = "default_rate_limit_jitter_ms")]
    pub rate_limit_jitter_ms: u64,
    /// Largest `Retry-After` honoured; longer hints are clamped (seconds).
    #[serde(default = "default_max_retry_after_secs")]
    pub max_retry_after_secs: u64,
    /// Delay after a non-429 HTTP error or a malformed body (milliseconds).
    #[serde(default = "default_error_delay_ms")]
    pub error_delay_ms: u64,
    /// Delay after the local request timeout fires (milliseconds).
    #[serde(default = "default_timeout_delay_ms")]
    pub timeout_delay_ms: u64,
    /// Delay after a transport failure or any other iteration error (milliseconds).
    #[serde(default = "default_failure_delay_ms")]
    pub failure_delay_ms: u64,
}

const fn default_min_interval_ms() -> u64 {
    1000
}

const fn default_rate_limit_default_ms() -> u64 {
    30_000
}

const fn default_rate_limit_jitter_ms() -> u64 {
    2000
}

const fn default_max_retry_after_secs() -> u64 {
    600
}

const fn default_error_delay_ms() -> u64 {
    2500
}

const fn default_timeout_delay_ms() -> u64 {
    1000
}

const fn default_failure_delay_ms() -> u64 {
    5000
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            rate_limit_default_ms: default_rate_limit_default_ms(),
            rate_limit_jitter_ms: default_rate_limit_jitter_ms(),
            max_retry_after_secs: default_max_retry_after_secs(),
            error_delay_ms: default_error_delay_ms(),
            timeout_delay_ms: default_timeout_delay_ms(),
            failure_delay_ms: default_failure_delay_ms(),
        }
    }
}

/// Computes the wait before the next poll.
#[derive(Debug, Clone)]
pub struct BackoffController {
    config: BackoffConfig,
}

impl BackoffController {
    #[must_use]
    pub fn new(config: BackoffConfig) -> Self {
        Self { config }
    }

    /// Delay after a classified poll result.
    ///
    /// `since_request_start` is how long ago the previous request was issued;
    /// the result is never less than what remains of the floor.
    #[must_use]
    pub fn next_delay(&self, result: &PollResult, since_request_start: Duration) -> Duration {
        let delay = match result {
            PollResult::Event(_) | PollResult::Empty => Duration::ZERO,
            PollResult::RateLimited(Some(secs)) if *secs > 0 => {
                let secs = (*secs).min(self.config.max_retry_after_secs);
                Duration::from_secs(secs) + Duration::from_millis(self.jitter_ms())
            }
            PollResult::RateLimited(_) => Duration::from_millis(self.config.rate_limit_default_ms),
            PollResult::HttpError(_) | PollResult::MalformedResponse => {
                Duration::from_millis(self.config.error_delay_ms)
            }
            PollResult::Timeout => Duration::from_millis(self.config.timeout_delay_ms),
        };
        self.clamp_to_floor(delay, since_request_start)
    }

    /// Delay after an iteration failed outright, e.g. a transport error.
    #[must_use]
    pub fn after_failure(&self, since_request_start: Duration) -> Duration {
        self.clamp_to_floor(
            Duration::from_millis(self.config.failure_delay_ms),
            since_request_start,
        )
    }

    /// The configured floor between request starts.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.config.min_interval_ms)
    }

    fn clamp_to_floor(&self, delay: Duration, since_request_start: Duration) -> Duration {
        delay.max(self.min_interval().saturating_sub(since_request_start))
    }

    fn jitter_ms(&self) -> u64 {
        if self.config.rate_limit_jitter_ms == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..self.config.rate_limit_jitter_ms)
    }
}

impl Default for BackoffController {
    fn default() -> Self {
        Self::new(BackoffConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Killmail;

    const LONG_AGO: Duration = Duration::from_secs(60);

    #[test]
    fn retry_after_adds_bounded_jitter() {
        let controller = BackoffController::default();
        for _ in 0..200 {
            let delay = controller.next_delay(&PollResult::RateLimited(Some(30)), LONG_AGO);
            let ms = delay.as_millis();
            assert!((30_000..32_000).contains(&ms), "delay {ms}ms out of range");
        }
    }

    #[test]
    fn rate_limit_without_hint_uses_default() {
        let controller = BackoffController::new(BackoffConfig {
            rate_limit_default_ms: 45_000,
            ..Default::default()
        });
        assert_eq!(
            controller.next_delay(&PollResult::RateLimited(None), LONG_AGO),
            Duration::from_millis(45_000)
        );
        // Zero is not a usable hint.
        assert_eq!(
            controller.next_delay(&PollResult::RateLimited(Some(0)), LONG_AGO),
            Duration::from_millis(45_000)
        );
    }

    #[test]
    fn huge_retry_after_is_clamped() {
        let controller = BackoffController::new(BackoffConfig {
            rate_limit_jitter_ms: 0,
            max_retry_after_secs: 120,
            ..Default::default()
        });
        assert_eq!(
            controller.next_delay(&PollResult::RateLimited(Some(86_400)), LONG_AGO),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn errors_and_timeouts_use_short_fixed_delays() {
        let controller = BackoffController::default();
        assert_eq!(
            controller.next_delay(&PollResult::HttpError(502), LONG_AGO),
            Duration::from_millis(2500)
        );
        assert_eq!(
            controller.next_delay(&PollResult::MalformedResponse, LONG_AGO),
            Duration::from_millis(2500)
        );
        assert_eq!(
            controller.next_delay(&PollResult::Timeout, LONG_AGO),
            Duration::from_millis(1000)
        );
        assert_eq!(controller.after_failure(LONG_AGO), Duration::from_millis(5000));
    }

    #[test]
    fn success_waits_only_for_the_floor() {
        let controller = BackoffController::default();

        assert_eq!(
            controller.next_delay(&PollResult::Empty, LONG_AGO),
            Duration::ZERO
        );
        assert_eq!(
            controller.next_delay(&PollResult::Event(Killmail::default()), LONG_AGO),
            Duration::ZERO
        );

        // An instant answer still waits out the rest of the floor.
        assert_eq!(
            controller.next_delay(&PollResult::Empty, Duration::from_millis(200)),
            Duration::from_millis(800)
        );
    }

    #[test]
    fn floor_applies_to_every_path() {
        let controller = BackoffController::new(BackoffConfig {
            min_interval_ms: 10_000,
            ..Default::default()
        });
        let instant = Duration::ZERO;
        for result in [
            PollResult::Empty,
            PollResult::Timeout,
            PollResult::HttpError(500),
            PollResult::MalformedResponse,
        ] {
            assert!(controller.next_delay(&result, instant) >= Duration::from_secs(10));
        }
        assert!(controller.after_failure(instant) >= Duration::from_secs(10));
    }
}
