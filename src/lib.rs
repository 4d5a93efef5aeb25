//! Ember Tasks - background task scheduling for the Ember engine.
//!
//! A fixed-size worker pool fed by a mutex/condvar-protected FIFO
//! queue. Callers submit closures and get a [`DeferredResult`] back
//! immediately; some idle worker dequeues the task, runs it, and stores
//! the outcome for the caller to poll or block on. The process-wide
//! [`PoolRegistry`] holds the long-lived `"resources"` pool used for
//! background loading.
//!
//! What this crate deliberately does not do: work stealing, priorities,
//! cancellation, or dependency graphs between pools. It is sized for a
//! small number of IO- or decode-bound jobs, not general parallelism.

// Constants module
pub mod constants;

// Core scheduling
pub mod error;
pub mod thread_pool;

// Typed job contracts consumed by engine subsystems
pub mod jobs;

pub use error::{TaskError, TaskResult};
pub use thread_pool::{
    default_worker_count, DeferredResult, Pool, PoolRegistry, PoolStats, Status, RESOURCES_POOL,
};

pub use jobs::{
    submit_sound_upload, AudioBackend, AudioUploadError, SoundUploadArgs, SoundUploadResult,
};
