//! Background task scheduling.
//!
//! Expensive, blocking work (decoding a sound file, preparing
//! device-bound resources) is submitted as a closure to a [`Pool`] and
//! runs on one of its fixed set of worker threads. The submitter gets a
//! [`DeferredResult`] back immediately and polls or blocks on it for
//! the outcome.
//!
//! Shutdown policy: dropping a pool joins its workers after each
//! finishes the task it is currently running; tasks still queued at
//! that point are discarded and their deferred results stay
//! [`Status::NotReady`] forever.

pub mod deferred;
pub mod pool;
pub mod registry;

pub(crate) mod queue;
pub(crate) mod worker;

pub use deferred::{DeferredResult, Status};
pub use pool::{default_worker_count, Pool, PoolStats};
pub use registry::{PoolRegistry, RESOURCES_POOL};
