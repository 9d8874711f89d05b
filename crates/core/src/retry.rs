//! Retry combinator for transactions that can fail on serialization.
//!
//! Postgres aborts one of two conflicting transactions with a
//! serialization failure (40001) or deadlock (40P01); both are safe to
//! rerun. The combinator wraps seat-allocation and confirmation
//! transactions so those aborts never surface to callers.

use std::future::Future;
use std::time::Duration;

use skyfare_types::{AppError, Result};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub factor: u32,
    /// Which errors are worth another attempt.
    pub retry_on: fn(&AppError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(50),
            factor: 2,
            retry_on: is_serialization_failure,
        }
    }
}

/// True for Postgres serialization failures and deadlocks.
pub fn is_serialization_failure(err: &AppError) -> bool {
    match err {
        AppError::Database(sqlx::Error::Database(db)) => {
            matches!(db.code().as_deref(), Some("40001") | Some("40P01"))
        }
        _ => false,
    }
}

/// Run `op` until it succeeds, the error is not retryable, or attempts
/// run out. Backoff doubles between attempts.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = policy.base_delay;

    for attempt in 1..=policy.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts && (policy.retry_on)(&err) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    "Retrying transaction after transient failure"
                );
                tokio::time::sleep(delay).await;
                delay *= policy.factor;
            }
            Err(err) => return Err(err),
        }
    }

    unreachable!("retry loop always returns from its final attempt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(retry_on: fn(&AppError) -> bool) -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            factor: 2,
            retry_on,
        }
    }

    fn always(_: &AppError) -> bool {
        true
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let policy = fast_policy(always);

        let result = retry(&policy, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(AppError::Internal("transient".to_string()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let policy = fast_policy(always);

        let result: Result<()> = retry(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::Internal("still broken".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_errors_pass_through() {
        let calls = AtomicU32::new(0);
        let policy = fast_policy(is_serialization_failure);

        let result: Result<()> = retry(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::Forbidden) }
        })
        .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
