//! Conflict retry driver
//!
//! A pass that loses an optimistic-concurrency race is rerun from scratch,
//! so every retry starts with fresh reads. Only conflicts retry; any other
//! error propagates immediately.

use std::future::Future;

use tetris_reconciler_store::StoreError;

/// Attempts before a conflict is surfaced to the caller
pub const DEFAULT_ATTEMPTS: u32 = 5;

/// Run `pass` until it succeeds, fails with a non-conflict error, or
/// exhausts `attempts`
pub async fn with_conflict_retry<T, F, Fut>(attempts: u32, mut pass: F) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match pass().await {
            Err(err) if err.is_conflict() && attempt < attempts => {
                tracing::debug!(attempt, %err, "pass conflicted, rerunning");
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn conflict() -> StoreError {
        StoreError::Conflict {
            kind: "board",
            name: "board".into(),
            expected: 1,
            actual: 2,
        }
    }

    #[tokio::test]
    async fn test_first_success_returns() {
        let result = with_conflict_retry(5, || async { Ok::<_, StoreError>(42) }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_conflicts_rerun_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_conflict_retry(5, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(conflict())
                } else {
                    Ok(n)
                }
            }
        })
        .await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_conflicts_surface() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_conflict_retry(3, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(conflict()) }
        })
        .await;
        assert!(result.is_err_and(|err| err.is_conflict()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_other_errors_do_not_rerun() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_conflict_retry(5, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(StoreError::NotFound {
                    kind: "board",
                    name: "board".into(),
                })
            }
        })
        .await;
        assert!(result.is_err_and(|err| err.is_not_found()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
