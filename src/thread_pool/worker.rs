//! Per-thread worker loop.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::thread_pool::queue::TaskQueue;

/// A long-lived worker bound to one pool's queue for its whole life.
///
/// Workers hold shared ownership of the queue, so the queue outlives
/// every worker regardless of how the owning pool is torn down.
pub(crate) struct Worker {
    index: usize,
    queue: Arc<TaskQueue>,
}

impl Worker {
    pub fn new(index: usize, queue: Arc<TaskQueue>) -> Self {
        Self { index, queue }
    }

    /// Waits for, dequeues, and executes one task at a time until the
    /// owning pool requests shutdown.
    ///
    /// A task failure never escapes this loop and never takes the
    /// worker thread down; failures are delivered through the task's
    /// own result cell.
    pub fn run(self) {
        log::debug!("worker {} started", self.index);

        while let Some(task) = self.queue.wait_dequeue() {
            if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
                // Submitted tasks capture their own panics into the
                // result cell; this only trips for an escape from that
                // capture, and the worker still must survive it.
                log::error!("worker {}: task panicked past its result cell", self.index);
            }
        }

        log::debug!("worker {} exiting", self.index);
    }
}
