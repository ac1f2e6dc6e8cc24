use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A spawned task that is aborted when the guard is dropped.
///
/// Ties a timer's lifetime to the component that owns it.
#[derive(Debug)]
pub struct ScopedTask(JoinHandle<()>);

impl ScopedTask {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(future))
    }

    /// Runs `future` once `delay` has elapsed, unless dropped first.
    pub fn delayed<F>(delay: Duration, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self::spawn(async move {
            tokio::time::sleep(delay).await;
            future.await;
        })
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }

    /// Aborts the task now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delayed_task_runs_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let task = ScopedTask::delayed(Duration::from_millis(300), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_guard_aborts_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let task = ScopedTask::delayed(Duration::from_millis(300), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        task.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
