//! Retry with capped exponential backoff for transient store failures.
//!
//! Only [`StorageError::Unavailable`] is retried: a busy or unreachable
//! database has not applied the statement, so repeating it is safe.

use std::time::Duration;

use crate::error::StorageError;

/// Configuration for retry behavior on transient store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Backoff is capped here.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: physlog_core::DEFAULT_STORE_ATTEMPTS,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self { max_attempts: max_attempts.max(1), ..Self::default() }
    }

    /// Delay after the given failed attempt (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op`, retrying transient failures per `config`.
pub(crate) fn with_retry<T>(
    config: &RetryConfig,
    operation: &str,
    mut op: impl FnMut() -> Result<T, StorageError>,
) -> Result<T, StorageError> {
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < config.max_attempts => {
                let delay = config.delay_for(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "transient store error, retrying"
                );
                std::thread::sleep(delay);
                attempt += 1;
            },
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for(1), Duration::from_millis(50));
        assert_eq!(config.delay_for(2), Duration::from_millis(100));
        assert_eq!(config.delay_for(3), Duration::from_millis(200));
        assert_eq!(config.delay_for(10), Duration::from_secs(1));
    }

    #[test]
    fn transient_errors_are_retried_until_success() {
        let mut calls = 0;
        let result = with_retry(&fast(3), "test", || {
            calls += 1;
            if calls < 3 { Err(StorageError::Unavailable("busy".to_owned())) } else { Ok(calls) }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), _> = with_retry(&fast(2), "test", || {
            calls += 1;
            Err(StorageError::Unavailable("busy".to_owned()))
        });
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = with_retry(&fast(5), "test", || {
            calls += 1;
            Err(StorageError::Migration("boom".to_owned()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
