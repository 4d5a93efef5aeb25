//! Mutex-protected FIFO feeding a pool's workers.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

/// A deferred unit of work. Return values do not pass through the
/// queue; they escape through the result cell captured by the closure.
pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    tasks: VecDeque<Task>,
    shutdown: bool,
}

/// Strict-FIFO task queue shared by all workers of one pool.
///
/// The shutdown flag lives inside the same locked state as the task
/// list, so every wake re-checks shutdown and emptiness under one lock
/// and a wake can never slip between the predicate check and the wait.
pub(crate) struct TaskQueue {
    state: Mutex<QueueState>,
    task_ready: Condvar,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                shutdown: false,
            }),
            task_ready: Condvar::new(),
        }
    }

    /// Appends to the tail and wakes one waiting worker.
    ///
    /// Returns `false` without queuing anything once the queue has been
    /// shut down.
    pub fn enqueue(&self, task: Task) -> bool {
        {
            let mut state = self.state.lock();
            if state.shutdown {
                return false;
            }
            state.tasks.push_back(task);
        }
        self.task_ready.notify_one();
        true
    }

    /// Removes and returns the head without blocking.
    pub fn try_dequeue(&self) -> Option<Task> {
        self.state.lock().tasks.pop_front()
    }

    /// Blocks until a task is available or the queue shuts down.
    ///
    /// Returns `None` on shutdown even if tasks remain queued; those
    /// tasks are discarded by policy, never handed out.
    pub fn wait_dequeue(&self) -> Option<Task> {
        let mut state = self.state.lock();
        loop {
            if state.shutdown {
                return None;
            }
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }
            self.task_ready.wait(&mut state);
        }
    }

    /// Snapshot of the queued task count. Stale as soon as it is read.
    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().tasks.is_empty()
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.lock().shutdown
    }

    /// Marks the queue shut down and wakes every waiting worker.
    ///
    /// Each worker must observe the flag itself; a single wake is not
    /// enough.
    pub fn shut_down(&self) {
        self.state.lock().shutdown = true;
        self.task_ready.notify_all();
    }
}
