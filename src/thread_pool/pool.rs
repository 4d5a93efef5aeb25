//! Fixed-size worker pool with deferred-result submission.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::constants::MAX_AUTO_WORKERS;
use crate::error::TaskError;
use crate::thread_pool::deferred::{deferred_pair, DeferredResult};
use crate::thread_pool::queue::{Task, TaskQueue};
use crate::thread_pool::worker::Worker;

/// Counters for one pool's lifetime, cloned out as a snapshot.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub tasks_submitted: u64,
    pub tasks_completed: u64,
    pub tasks_panicked: u64,
}

/// A fixed set of worker threads draining one shared FIFO queue.
///
/// Workers are spawned at construction and joined when the pool is
/// dropped. Dropping blocks the calling thread until every worker has
/// observed shutdown and exited; the task a worker is currently running
/// finishes, but tasks still queued are discarded and their deferred
/// results never resolve. Callers must not rely on enqueued-but-
/// unexecuted work surviving shutdown.
pub struct Pool {
    name: String,
    queue: Arc<TaskQueue>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    worker_count: usize,
    stats: Arc<Mutex<PoolStats>>,
}

/// Worker count for pools sized from the host rather than a constant.
pub fn default_worker_count() -> usize {
    num_cpus::get().clamp(1, MAX_AUTO_WORKERS)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

impl Pool {
    /// Creates a pool with `worker_count` threads.
    ///
    /// A count of zero is valid: the pool accepts submissions but never
    /// executes them, and their results stay pending.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn a worker thread.
    pub fn new(worker_count: usize) -> Self {
        Self::named("ember", worker_count)
    }

    /// Creates a pool whose worker threads are named `{name}-worker-{i}`.
    pub fn named(name: &str, worker_count: usize) -> Self {
        let queue = Arc::new(TaskQueue::new());
        let mut workers = Vec::with_capacity(worker_count);

        for index in 0..worker_count {
            let worker = Worker::new(index, Arc::clone(&queue));
            let handle = thread::Builder::new()
                .name(format!("{}-worker-{}", name, index))
                .spawn(move || worker.run())
                .expect("failed to spawn worker thread");
            workers.push(handle);
        }

        log::info!("pool '{}' started with {} workers", name, worker_count);

        Self {
            name: name.to_string(),
            queue,
            workers: Mutex::new(workers),
            worker_count,
            stats: Arc::new(Mutex::new(PoolStats::default())),
        }
    }

    /// Submits a job and immediately returns the handle its result will
    /// arrive through.
    ///
    /// Safe to call from any number of threads. A panic inside `job` is
    /// captured on the worker and delivered as
    /// [`TaskError::Panicked`]; it never kills the worker thread.
    ///
    /// After [`shutdown`](Self::shutdown) the job is not queued and the
    /// returned handle is already resolved to
    /// [`TaskError::PoolShutDown`]. A submission racing a concurrent
    /// shutdown may instead be discarded with the rest of the queue, in
    /// which case the handle stays pending like any other discarded
    /// task.
    pub fn submit<F, T>(&self, job: F) -> DeferredResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (writer, result) = deferred_pair();

        if self.queue.is_shut_down() {
            writer.fulfill(Err(TaskError::PoolShutDown));
            return result;
        }

        let stats = Arc::clone(&self.stats);
        let task: Task = Box::new(move || match panic::catch_unwind(AssertUnwindSafe(job)) {
            Ok(value) => {
                stats.lock().tasks_completed += 1;
                writer.fulfill(Ok(value));
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::warn!("background task panicked: {}", message);
                stats.lock().tasks_panicked += 1;
                writer.fulfill(Err(TaskError::Panicked(message)));
            }
        });

        if self.queue.enqueue(task) {
            self.stats.lock().tasks_submitted += 1;
        }
        result
    }

    /// Stops accepting work, wakes every idle worker, and joins them.
    ///
    /// Idempotent; invoked automatically on drop. Returns only after
    /// the task each worker is currently running (if any) has finished.
    /// Queued-but-unstarted tasks are discarded.
    pub fn shutdown(&self) {
        let handles = std::mem::take(&mut *self.workers.lock());

        if !self.queue.is_shut_down() {
            self.queue.shut_down();
            if !self.queue.is_empty() {
                let mut discarded = 0usize;
                while self.queue.try_dequeue().is_some() {
                    discarded += 1;
                }
                log::warn!(
                    "pool '{}': discarding {} queued tasks at shutdown",
                    self.name,
                    discarded
                );
            }
            log::debug!("pool '{}' shutting down", self.name);
        }

        for handle in handles {
            if handle.join().is_err() {
                log::error!("pool '{}': worker thread terminated abnormally", self.name);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Snapshot of the queued (not yet started) task count.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot of the lifetime counters.
    pub fn stats(&self) -> PoolStats {
        self.stats.lock().clone()
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
