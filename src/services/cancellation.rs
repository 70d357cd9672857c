use std::{future::Future, sync::Arc};

use tokio::sync::watch;

use crate::error::{AppError, AppResult};

/// Owns the "latest request" generation for one fetch site
///
/// Every call to [`RequestController::begin`] bumps the generation and
/// hands out a token bound to it; all earlier tokens become stale at that
/// moment. Cloning shares the same generation.
#[derive(Clone, Debug)]
pub struct RequestController {
    site: &'static str,
    generation: Arc<watch::Sender<u64>>,
}

impl RequestController {
    pub fn new(site: &'static str) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            site,
            generation: Arc::new(generation),
        }
    }

    /// Invalidates any outstanding token and issues a new current one
    pub fn begin(&self) -> RequestToken {
        let mut id = 0;
        self.generation.send_modify(|generation| {
            *generation += 1;
            id = *generation;
        });

        RequestToken {
            site: self.site,
            id,
            generation: self.generation.subscribe(),
        }
    }

    /// Invalidates any outstanding token without starting a new request
    pub fn cancel(&self) {
        self.generation.send_modify(|generation| *generation += 1);
        tracing::debug!(site = self.site, "Outstanding request cancelled");
    }

    pub fn site(&self) -> &'static str {
        self.site
    }
}

/// Identity of one fetch attempt
#[derive(Clone, Debug)]
pub struct RequestToken {
    site: &'static str,
    id: u64,
    generation: watch::Receiver<u64>,
}

impl RequestToken {
    /// True while no newer request has started at this site
    pub fn is_current(&self) -> bool {
        *self.generation.borrow() == self.id
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn site(&self) -> &'static str {
        self.site
    }

    /// Resolves once this token has been superseded or its controller dropped
    pub async fn cancelled(&self) {
        let mut generation = self.generation.clone();
        let id = self.id;
        // A closed channel means the controller is gone, which counts as cancelled
        let _ = generation.wait_for(|current| *current != id).await;
    }

    /// Drives `fut` unless the token is superseded first
    ///
    /// A stale token never polls `fut` at all, so no request is issued.
    /// Dropping `fut` on cancellation aborts the underlying transfer.
    pub async fn run<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if !self.is_current() {
            return Err(AppError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(AppError::Cancelled),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };

    #[test]
    fn test_begin_supersedes_previous_token() {
        let controller = RequestController::new("search");
        let first = controller.begin();
        assert!(first.is_current());

        let second = controller.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.id() > first.id());
        assert_eq!(second.site(), "search");
    }

    #[test]
    fn test_cancel_invalidates_without_new_token() {
        let controller = RequestController::new("detail");
        let token = controller.begin();
        controller.cancel();
        assert!(!token.is_current());
    }

    #[test]
    fn test_controllers_are_independent() {
        let search = RequestController::new("search");
        let detail = RequestController::new("detail");

        let search_token = search.begin();
        let detail_token = detail.begin();
        search.cancel();

        assert!(!search_token.is_current());
        assert!(detail_token.is_current());
    }

    #[test]
    fn test_clones_share_generation() {
        let controller = RequestController::new("search");
        let token = controller.begin();
        controller.clone().cancel();
        assert!(!token.is_current());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes_when_current() {
        let controller = RequestController::new("search");
        let token = controller.begin();

        let result = token.run(async { Ok::<_, AppError>(42) }).await;
        let value = tokio_test::assert_ok!(result);
        assert_eq!(value, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_aborts_when_superseded_mid_flight() {
        let controller = RequestController::new("search");
        let token = controller.begin();

        let canceller = controller.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.begin();
        });

        let result = token
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, AppError>("late")
            })
            .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_stale_token_never_polls_future() {
        let controller = RequestController::new("recommendations");
        let token = controller.begin();
        controller.cancel();

        let polled = AtomicBool::new(false);
        let result = token
            .run(async {
                polled.store(true, Ordering::SeqCst);
                Ok::<_, AppError>(())
            })
            .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dropped_controller_counts_as_cancelled() {
        let controller = RequestController::new("search");
        let token = controller.begin();
        drop(controller);

        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("token should resolve as cancelled");
    }
}
