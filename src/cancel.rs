//! Per-call cancellation of an in-flight request.

use std::time::Duration;

use tokio::sync::watch;

/// Cancels the single fetch call it was handed to.
///
/// Create a handle, pass a clone to one verb call, and fire it from anywhere:
///
/// * [`cancel`](Self::cancel) aborts immediately;
/// * [`cancel_after`](Self::cancel_after) and
///   [`cancel_after_with`](Self::cancel_after_with) abort once a deadline
///   elapses, the latter running a preprocess closure first.
///
/// Each handle targets exactly the call it was passed to; handles never race
/// over a shared slot. Cancellation is best-effort "stop waiting": once the
/// response has arrived, decoding may still run to completion, and whatever
/// side effect the server performed is not undone.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: watch::Sender<bool>,
}

impl CancelHandle {
    /// Creates a handle that has not fired yet.
    #[must_use]
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self { flag }
    }

    /// Cancels the call immediately.
    pub fn cancel(&self) {
        self.flag.send_replace(true);
    }

    /// Returns whether this handle has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.flag.borrow()
    }

    /// Cancels the call once `delay` has elapsed.
    ///
    /// The future does the waiting; spawn it to fire-and-forget.
    pub async fn cancel_after(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
        self.cancel();
    }

    /// Like [`cancel_after`](Self::cancel_after), but runs `preprocess` after
    /// the deadline and before the cancel fires.
    pub async fn cancel_after_with(&self, delay: Duration, preprocess: impl FnOnce()) {
        tokio::time::sleep(delay).await;
        preprocess();
        self.cancel();
    }

    /// Resolves once the handle fires; pends forever otherwise.
    pub(crate) async fn cancelled(&self) {
        let mut rx = self.flag.subscribe();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // Cannot happen while `self` keeps a sender alive.
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unfired() {
        assert!(!CancelHandle::new().is_cancelled());
    }

    #[tokio::test]
    async fn cancel_resolves_waiters() {
        let handle = CancelHandle::new();
        handle.cancel();
        assert!(handle.is_cancelled());
        handle.cancelled().await;
    }

    #[tokio::test]
    async fn clones_observe_the_same_cancellation() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        handle.cancel();
        assert!(clone.is_cancelled());
        clone.cancelled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fires_once_the_deadline_elapses() {
        let handle = CancelHandle::new();
        let timer = handle.clone();
        let task = tokio::spawn(async move {
            timer.cancel_after(Duration::from_secs(5)).await;
        });
        handle.cancelled().await;
        assert!(handle.is_cancelled());
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_with_runs_preprocess_before_firing() {
        let handle = CancelHandle::new();
        let timer = handle.clone();
        let probe = handle.clone();
        let (tx, rx) = std::sync::mpsc::channel();
        let task = tokio::spawn(async move {
            timer
                .cancel_after_with(Duration::from_secs(5), move || {
                    tx.send(probe.is_cancelled()).unwrap();
                })
                .await;
        });
        handle.cancelled().await;
        task.await.unwrap();
        // The preprocess closure ran strictly before the cancel fired.
        assert!(!rx.recv().unwrap());
        assert!(handle.is_cancelled());
    }
}
