//! Error handling for the task scheduling subsystem.
//!
//! Background-job failures never crash a worker thread; they are
//! captured at the worker-loop boundary and surfaced through the
//! task's [`DeferredResult`](crate::thread_pool::DeferredResult).

/// Failure of a single background task, delivered through its
/// deferred result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The task body panicked while running on a worker thread.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task was submitted after the owning pool shut down.
    #[error("pool is shut down")]
    PoolShutDown,
}

/// Result type for values produced by background tasks.
pub type TaskResult<T> = Result<T, TaskError>;
