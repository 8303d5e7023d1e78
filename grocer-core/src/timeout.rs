//! Bounded waits.

use std::future::Future;
use std::time::Duration;

use crate::error::{GrocerError, Result};

/// Runs a future with a deadline.
///
/// Resolves to the future's output if it finishes within `duration`,
/// otherwise to [`GrocerError::OperationTimeout`]. The inner future is
/// dropped on timeout.
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| GrocerError::OperationTimeout(duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_in_time() {
        let value = with_timeout(Duration::from_secs(1), async { 7 }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let result = with_timeout(
            Duration::from_secs(45),
            tokio::time::sleep(Duration::from_secs(60)),
        )
        .await;

        match result {
            Err(GrocerError::OperationTimeout(after)) => {
                assert_eq!(after, Duration::from_secs(45));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
