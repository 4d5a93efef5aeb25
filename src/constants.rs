//! Engine-wide constants for background task scheduling.

/// Worker count for the shared resources pool.
///
/// Sized for decode/IO-bound loading jobs (sound files, model data),
/// not for CPU-bound parallelism. The registry clamps this to the
/// host's available parallelism.
pub const RESOURCES_POOL_WORKERS: usize = 2;

/// Upper bound on workers when a pool is sized from host parallelism.
pub const MAX_AUTO_WORKERS: usize = 4;
