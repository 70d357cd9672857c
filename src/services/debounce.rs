use std::time::Duration;

use crate::services::cancellation::{RequestController, RequestToken};

/// Holds back values until input has been quiet for `delay`
///
/// Each [`Debouncer::push`] restarts the timer: the previously returned
/// [`PendingCommit`] resolves to `None` and only the newest one can commit.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: RequestController,
}

/// A value waiting out the settle period
#[derive(Debug)]
pub struct PendingCommit<T> {
    value: T,
    delay: Duration,
    token: RequestToken,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: RequestController::new("debounce"),
        }
    }

    pub fn push<T>(&self, value: T) -> PendingCommit<T> {
        PendingCommit {
            value,
            delay: self.delay,
            token: self.pending.begin(),
        }
    }

    /// Drops whatever is pending without queueing a new value
    pub fn cancel(&self) {
        self.pending.cancel();
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> PendingCommit<T> {
    /// Waits out the delay; `None` if a newer value arrived meanwhile
    pub async fn settle(self) -> Option<T> {
        let delay = self.delay;
        let settled = self
            .token
            .run(async move {
                tokio::time::sleep(delay).await;
                Ok(())
            })
            .await;

        match settled {
            Ok(()) if self.token.is_current() => Some(self.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_single_value_commits_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let started = Instant::now();

        let committed = debouncer.push("fast").settle().await;

        assert_eq!(committed, Some("fast"));
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_of_rapid_values_commits() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let mut handles = Vec::new();
        for value in ["f", "fa", "fas", "fast"] {
            let pending = debouncer.push(value.to_string());
            handles.push(tokio::spawn(pending.settle()));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let mut committed = Vec::new();
        for handle in handles {
            if let Some(value) = handle.await.unwrap() {
                committed.push(value);
            }
        }

        assert_eq!(committed, vec!["fast".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let pending = tokio::spawn(debouncer.push(7).settle());

        tokio::time::sleep(Duration::from_millis(50)).await;
        debouncer.cancel();

        assert_eq!(pending.await.unwrap(), None);
    }
}
