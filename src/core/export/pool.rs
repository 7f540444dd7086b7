//! Bounded worker pools
//!
//! The coordinator runs on two independently sized pools: a generation pool
//! for CPU/IO-bound serialization work and a transfer pool for network-bound
//! import work, so one never starves the other. A pool admits up to
//! `workers` tasks at once and lets up to `queue_depth` further submissions
//! wait; anything beyond that is rejected as retryable back-pressure.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Semaphore, TryAcquireError};

/// Submission outcome when a task could not run to completion
#[derive(Debug, Error)]
pub enum PoolError {
    /// Workers busy and the wait queue is full; safe to re-submit later
    #[error("pool '{0}' saturated")]
    Saturated(String),

    /// Pool has been shut down
    #[error("pool '{0}' is shut down")]
    ShutDown(String),

    /// The awaited task was cancelled before finishing
    #[error("task on pool '{0}' was cancelled")]
    Interrupted(String),

    /// The task panicked
    #[error("task on pool '{0}' panicked: {1}")]
    Panicked(String, String),
}

/// A bounded pool of concurrent tasks with a bounded wait queue
#[derive(Debug)]
pub struct WorkerPool {
    name: String,
    permits: Arc<Semaphore>,
    waiting: AtomicUsize,
    queue_depth: usize,
}

impl WorkerPool {
    /// Creates a pool running at most `workers` tasks with at most
    /// `queue_depth` submissions waiting for a slot
    pub fn new(name: impl Into<String>, workers: usize, queue_depth: usize) -> Self {
        Self {
            name: name.into(),
            permits: Arc::new(Semaphore::new(workers.max(1))),
            waiting: AtomicUsize::new(0),
            queue_depth,
        }
    }

    /// Pool name, used in log fields and error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submits `task` and awaits its completion
    ///
    /// The caller blocks here until the task finishes; per-key serialization
    /// relies on the caller holding its stripe lock across this await.
    pub async fn submit<T, F>(&self, task: F) -> Result<T, PoolError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = match self.permits.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::Closed) => return Err(PoolError::ShutDown(self.name.clone())),
            Err(TryAcquireError::NoPermits) => {
                // All workers busy; join the bounded wait queue or bail.
                let waiting = self.waiting.fetch_add(1, Ordering::SeqCst);
                if waiting >= self.queue_depth {
                    self.waiting.fetch_sub(1, Ordering::SeqCst);
                    return Err(PoolError::Saturated(self.name.clone()));
                }
                let acquired = self.permits.clone().acquire_owned().await;
                self.waiting.fetch_sub(1, Ordering::SeqCst);
                match acquired {
                    Ok(permit) => permit,
                    Err(_) => return Err(PoolError::ShutDown(self.name.clone())),
                }
            }
        };

        let handle = tokio::spawn(async move {
            let _permit = permit;
            task.await
        });

        match handle.await {
            Ok(value) => Ok(value),
            Err(join_error) if join_error.is_cancelled() => {
                Err(PoolError::Interrupted(self.name.clone()))
            }
            Err(join_error) => Err(PoolError::Panicked(
                self.name.clone(),
                join_error.to_string(),
            )),
        }
    }

    /// Shuts the pool down; subsequent submissions are rejected
    ///
    /// Tasks already running are not cancelled.
    pub fn shutdown(&self) {
        tracing::info!(pool = %self.name, "Shutting down worker pool");
        self.permits.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_submit_runs_task() {
        let pool = WorkerPool::new("gen", 2, 2);
        let result = pool.submit(async { 7 }).await.unwrap();
        assert_eq!(result, 7);
    }

    #[tokio::test]
    async fn test_saturated_pool_rejects() {
        let pool = Arc::new(WorkerPool::new("gen", 1, 0));

        let blocker = Arc::clone(&pool);
        let hold = tokio::spawn(async move {
            blocker
                .submit(async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                })
                .await
        });

        // Give the first task time to claim the single worker slot.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let rejected = pool.submit(async { 1 }).await;
        assert!(matches!(rejected, Err(PoolError::Saturated(_))));

        hold.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_queued_submission_waits_for_slot() {
        let pool = Arc::new(WorkerPool::new("gen", 1, 1));

        let blocker = Arc::clone(&pool);
        let hold = tokio::spawn(async move {
            blocker
                .submit(async {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    1
                })
                .await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Fits in the wait queue and eventually runs.
        let queued = pool.submit(async { 2 }).await.unwrap();
        assert_eq!(queued, 2);
        hold.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_submissions() {
        let pool = WorkerPool::new("transfer", 2, 2);
        pool.shutdown();
        let result = pool.submit(async { 1 }).await;
        assert!(matches!(result, Err(PoolError::ShutDown(_))));
    }
}
