//! Blocking work behind future-like handles.
//!
//! # Design
//! The executor is synchronous; hosts consume results through a promise.
//! `TaskPool` makes that relationship explicit: submit a zero-argument
//! blocking operation, get back a `TaskHandle` that resolves to its result
//! or failure. All pools share one small process-wide runtime (lazily
//! initialized, never torn down) so handles and pools can be dropped from
//! any context; the actual work runs on the runtime's blocking thread
//! pool, one thread per in-flight operation. Submissions are independent
//! and unordered, and there is no cancellation once an operation has
//! started.

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::error::FetchError;

static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("fetch-pool")
        .build()
        .expect("failed to build fetch worker runtime")
});

/// Submission interface for offloading blocking operations.
#[derive(Debug, Clone, Default)]
pub struct TaskPool;

impl TaskPool {
    pub fn new() -> Self {
        Self
    }

    /// Run `op` on a worker thread and hand back a resolvable handle.
    pub fn submit<T, F>(&self, op: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, FetchError> + Send + 'static,
    {
        TaskHandle {
            inner: RUNTIME.spawn_blocking(op),
            handle: RUNTIME.handle().clone(),
        }
    }
}

/// A pending result from [`TaskPool::submit`].
///
/// Resolve it with [`wait`](TaskHandle::wait) from a plain thread or
/// [`join`](TaskHandle::join) from async code. A panicked operation
/// resolves to a `Transport` failure; it never poisons the pool.
#[derive(Debug)]
pub struct TaskHandle<T> {
    inner: JoinHandle<Result<T, FetchError>>,
    handle: Handle,
}

impl<T> TaskHandle<T> {
    /// Block the calling thread until the operation resolves.
    ///
    /// Must not be called from inside an async context; foreign (bridge)
    /// threads and test threads are the intended callers.
    pub fn wait(self) -> Result<T, FetchError> {
        match self.handle.block_on(self.inner) {
            Ok(result) => result,
            Err(err) => Err(FetchError::Transport(format!("worker task failed: {err}"))),
        }
    }

    /// Await the operation from async code.
    pub async fn join(self) -> Result<T, FetchError> {
        match self.inner.await {
            Ok(result) => result,
            Err(err) => Err(FetchError::Transport(format!("worker task failed: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_work_resolves_through_wait() {
        let pool = TaskPool::new();
        let handle = pool.submit(|| Ok(21 * 2));
        assert_eq!(handle.wait().unwrap(), 42);
    }

    #[test]
    fn failures_pass_through_unchanged() {
        let pool = TaskPool::new();
        let handle = pool.submit::<(), _>(|| Err(FetchError::TlsUnavailable));
        assert!(matches!(handle.wait(), Err(FetchError::TlsUnavailable)));
    }

    #[test]
    fn a_panicking_operation_resolves_to_an_error() {
        let pool = TaskPool::new();
        let handle = pool.submit::<(), _>(|| panic!("boom"));
        assert!(matches!(handle.wait(), Err(FetchError::Transport(_))));

        // The pool is still usable afterwards.
        let handle = pool.submit(|| Ok(1));
        assert_eq!(handle.wait().unwrap(), 1);
    }

    #[test]
    fn concurrent_submissions_are_independent() {
        let pool = TaskPool::new();
        let handles: Vec<_> = (0..8).map(|i| pool.submit(move || Ok(i))).collect();
        let mut results: Vec<i32> = handles.into_iter().map(|h| h.wait().unwrap()).collect();
        results.sort_unstable();
        assert_eq!(results, (0..8).collect::<Vec<_>>());
    }
}
