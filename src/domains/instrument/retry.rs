//! Bounded, fixed-interval retry.

use std::time::Duration;

use tracing::{debug, warn};

use super::error::{InstrumentError, InstrumentResult};

/// Total attempts made before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Pause between two consecutive attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// How many times to try an operation and how long to wait in between.
///
/// The delay is the same before every retry. The calling thread sleeps
/// through it; there is no cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// A policy of `max_attempts` total attempts. Zero is treated as one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it succeeds or the attempts run out.
    ///
    /// `op` receives the 1-based attempt number. Any error is retried; once
    /// the last attempt fails its error is returned wrapped in
    /// [`InstrumentError::Unavailable`].
    pub fn run<T, F>(&self, mut op: F) -> InstrumentResult<T>
    where
        F: FnMut(u32) -> InstrumentResult<T>,
    {
        let mut attempt = 1;

        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => {
                    warn!("Attempt {}/{} failed, giving up: {}", attempt, self.max_attempts, e);
                    return Err(InstrumentError::unavailable(attempt, e));
                }
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, self.max_attempts, e);
                }
            }

            debug!("Retrying in {:?}", self.delay);
            std::thread::sleep(self.delay);
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_first_success_makes_one_attempt() {
        let mut calls = 0;
        let result = instant(3).run(|_| {
            calls += 1;
            Ok::<_, InstrumentError>(7)
        });
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_succeeds_on_third_attempt() {
        let mut calls = 0;
        let result = instant(3).run(|attempt| {
            calls += 1;
            if attempt < 3 {
                Err(InstrumentError::Status(503))
            } else {
                Ok("reading")
            }
        });
        assert_eq!(result.unwrap(), "reading");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_exhaustion_surfaces_last_error() {
        let mut calls = 0;
        let result: InstrumentResult<()> = instant(3).run(|attempt| {
            calls += 1;
            Err(InstrumentError::request(format!("attempt {attempt}")))
        });

        assert_eq!(calls, 3);
        match result.unwrap_err() {
            InstrumentError::Unavailable { attempts, last } => {
                assert_eq!(attempts, 3);
                assert_eq!(last.to_string(), "Request failed: attempt 3");
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let mut calls = 0;
        let _ = instant(0).run(|_| {
            calls += 1;
            Err::<(), _>(InstrumentError::Status(500))
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_waits_between_attempts_only() {
        let policy = RetryPolicy::new(2, Duration::from_millis(20));
        let start = std::time::Instant::now();
        let _ = policy.run(|_| Err::<(), _>(InstrumentError::Status(500)));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(20));
        assert!(elapsed < Duration::from_millis(1000));
    }
}
