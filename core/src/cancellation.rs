//! Cooperative cancellation tokens
//!
//! A [`CancellationToken`] is a shared flag that async work checks at its
//! await points. Cancelling is idempotent and never blocks; a token that
//! nothing observes can be cancelled freely, which makes a fresh default
//! token a valid stand-in before any work has started.
//!
//! ```
//! use todo_view_core::cancellation::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let observer = token.clone();
//! token.cancel();
//! assert!(observer.is_cancelled());
//! ```

use std::sync::Arc;
use tokio::sync::watch;

/// Shared cancellation flag
///
/// Clones observe the same flag.
#[derive(Clone)]
pub struct CancellationToken {
    flag: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    #[must_use]
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self {
            flag: Arc::new(flag),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.send_replace(true);
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.flag.borrow()
    }

    /// Complete once cancellation has been requested
    ///
    /// Resolves immediately if the token is already cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.flag.subscribe();
        // The sender lives as long as `self`, so this only returns once the flag is set.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Whether two tokens share the same flag
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.flag, &other.flag)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cancel_is_idempotent() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::default();
        let clone = token.clone();
        assert!(token.same_as(&clone));
        assert!(!token.same_as(&CancellationToken::new()));

        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_after_cancel() {
        let token = CancellationToken::new();
        let waiter = token.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!task.is_finished());

        token.cancel();
        let joined = tokio::time::timeout(Duration::from_secs(1), task).await;
        assert!(matches!(joined, Ok(Ok(()))));
    }

    #[test]
    fn cancelled_resolves_immediately_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        tokio_test::block_on(token.cancelled());
    }
}
