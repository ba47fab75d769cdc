//! Bounded retry with a fixed delay between attempts
//!
//! An operation is attempted up to `max_attempts` times. Failures the
//! predicate rejects end the loop at once; the rest are retried after the
//! policy's delay until the attempts run out.

use crate::error::RefugeError;
use crate::settings::FetchSettings;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Errors that can be classified as transient
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for RefugeError {
    fn is_retryable(&self) -> bool {
        match self {
            // Timeouts and other transport or status failures are worth another try
            RefugeError::Timeout { .. } | RefugeError::Request { .. } => true,
            RefugeError::Io(_)
            | RefugeError::Csv(_)
            | RefugeError::Json(_)
            | RefugeError::InvalidUrl(_)
            | RefugeError::Config(_)
            | RefugeError::Validation(_)
            | RefugeError::MissingColumn(_)
            | RefugeError::Persist { .. } => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_settings(settings: &FetchSettings) -> Self {
        Self::new(settings.max_attempts, settings.retry_delay())
    }
}

/// Result of a retried operation
#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    Success(T),
    /// Every attempt failed with a retryable error
    Exhausted { attempts: u32, last_error: E },
    /// An attempt failed with an error the predicate refused to retry
    Aborted(E),
}

/// Run `operation` under `policy`
///
/// The operation receives the 1-based attempt number. No delay follows
/// the final attempt.
pub async fn retry_with_policy<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempts = attempt, "Operation succeeded after retry");
                }
                return RetryOutcome::Success(value);
            }
            Err(error) if !is_retryable(&error) => {
                tracing::debug!(error = %error, attempt, "Operation failed with a permanent error");
                return RetryOutcome::Aborted(error);
            }
            Err(error) if attempt >= max_attempts => {
                return RetryOutcome::Exhausted {
                    attempts: attempt,
                    last_error: error,
                };
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn transient(error: &TestError) -> bool {
        *error == TestError::Transient
    }

    fn quick_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let calls = Cell::new(0);
        let outcome = retry_with_policy(&quick_policy(3), transient, |_| {
            calls.set(calls.get() + 1);
            async { Ok::<_, TestError>("page") }
        })
        .await;

        assert!(matches!(outcome, RetryOutcome::Success("page")));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let outcome = retry_with_policy(&quick_policy(3), transient, |attempt| async move {
            if attempt < 3 {
                Err(TestError::Transient)
            } else {
                Ok(attempt)
            }
        })
        .await;

        assert!(matches!(outcome, RetryOutcome::Success(3)));
    }

    #[tokio::test]
    async fn test_exhausted_after_max_attempts() {
        let calls = Cell::new(0);
        let outcome = retry_with_policy(&quick_policy(3), transient, |_| {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(TestError::Transient) }
        })
        .await;

        match outcome {
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, TestError::Transient);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_aborts_immediately() {
        let calls = Cell::new(0);
        let outcome = retry_with_policy(&quick_policy(3), transient, |_| {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(TestError::Permanent) }
        })
        .await;

        assert!(matches!(outcome, RetryOutcome::Aborted(TestError::Permanent)));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts, 1);

        let outcome =
            retry_with_policy(&policy, transient, |_| async { Err::<(), _>(TestError::Transient) })
                .await;
        assert!(matches!(outcome, RetryOutcome::Exhausted { attempts: 1, .. }));
    }

    #[test]
    fn test_refuge_error_classification() {
        let timeout = RefugeError::Timeout {
            url: "http://localhost/api".to_string(),
        };
        assert!(timeout.is_retryable());
        assert!(!RefugeError::MissingColumn("address".to_string()).is_retryable());
        let persist = RefugeError::Persist {
            path: "refuge_data.csv".into(),
            source: std::sync::Arc::new(timeout),
        };
        assert!(!persist.is_retryable());
    }
}
