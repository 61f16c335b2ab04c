use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use tracing::trace;

#[derive(Debug, Default)]
struct Inner {
    pending: AtomicUsize,
    idle: Notify,
}

/// Counts outstanding crawl branches and lets a caller wait for zero.
///
/// A unit of work is registered with [`WorkTracker::register`] before its
/// task is spawned; the returned [`WorkGuard`] completes it when dropped.
#[derive(Debug, Clone, Default)]
pub struct WorkTracker {
    inner: Arc<Inner>,
}

impl WorkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> WorkGuard {
        let pending = self.inner.pending.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(pending, "Registered unit of work");
        WorkGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn outstanding(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Wait until every registered unit of work has completed.
    ///
    /// Returns immediately if nothing is outstanding, so the first unit must
    /// be registered before waiting.
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// One registered unit of work. Dropping it marks the unit complete.
#[derive(Debug)]
pub struct WorkGuard {
    inner: Arc<Inner>,
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        let previous = self.inner.pending.fetch_sub(1, Ordering::SeqCst);
        trace!(pending = previous - 1, "Completed unit of work");
        if previous == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}
