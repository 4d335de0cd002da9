//! A bounded pool of worker threads and scoped task groups.
//!
//! Work is submitted to a [`TaskGroup`] and runs in parallel with no
//! ordering guarantee. The group is joined when the closure passed to
//! [`ThreadPool::task_group`] returns and every submitted task finished;
//! the errors reported by the tasks (including unwinds) are returned as a
//! list for the caller to aggregate.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{format_error, Error, Exception};

/// A pool of threads for executing work concurrently.
///
/// The number of threads is fixed at construction.
pub struct ThreadPool {
    pool: rayon::ThreadPool,
}

impl ThreadPool {
    /// Create a pool with `concurrency` threads.
    ///
    /// A concurrency of zero uses the available hardware parallelism.
    pub fn new(concurrency: usize) -> Result<Self, Error> {
        let threads = if concurrency == 0 {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            concurrency
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("refdoc-worker-{index}"))
            .build()
            .map_err(|e| format_error!("could not create a pool of {threads} threads: {e}"))?;
        tracing::debug!(threads, "created thread pool");
        Ok(ThreadPool { pool })
    }

    /// Return the number of threads in the pool.
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `f` with a fresh task group and wait for all of its work.
    ///
    /// `f` runs on the calling thread and may submit any number of tasks;
    /// submission never blocks and every pool thread stays free for the
    /// submitted work. Returns zero or more errors reported by that work,
    /// in completion order.
    pub fn task_group<'scope, F>(&self, f: F) -> Vec<Error>
    where
        F: FnOnce(&TaskGroup<'_, 'scope>),
    {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::clone(&errors);
        self.pool.in_place_scope(move |scope: &rayon::Scope<'scope>| {
            f(&TaskGroup {
                scope,
                errors: shared,
            });
        });
        let mut guard = errors.lock();
        std::mem::take(&mut *guard)
    }

    /// Invoke `f` for each element of `items` on the pool.
    ///
    /// Returns zero or more errors reported by the invocations.
    pub fn for_each<T, F>(&self, items: &[T], f: F) -> Vec<Error>
    where
        T: Sync,
        F: Fn(&T) -> Result<(), Error> + Sync,
    {
        let f = &f;
        self.task_group(|group| {
            for item in items {
                group.spawn(move || f(item));
            }
        })
    }
}

/// A subset of the work in a [`ThreadPool`], joined as a unit.
pub struct TaskGroup<'a, 'scope> {
    scope: &'a rayon::Scope<'scope>,
    errors: Arc<Mutex<Vec<Error>>>,
}

impl<'scope> TaskGroup<'_, 'scope> {
    /// Submit work to be executed.
    ///
    /// A returned error, or an unwind raised by the task, is recorded and
    /// reported when the group is joined. Sibling tasks are unaffected.
    pub fn spawn<F>(&self, task: F)
    where
        F: FnOnce() -> Result<(), Error> + Send + 'scope,
    {
        let errors = Arc::clone(&self.errors);
        self.scope.spawn(move |_| {
            let err = match panic::catch_unwind(AssertUnwindSafe(task)) {
                Ok(Ok(())) => return,
                Ok(Err(err)) => err,
                Err(payload) => Exception::from_panic(payload),
            };
            if err.failed() {
                errors.lock().push(err);
            }
        });
    }
}

#[cfg(test)]
mod tests;
