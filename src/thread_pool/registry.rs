//! Process-wide registry of named thread pools.

use lazy_static::lazy_static;

use crate::constants::RESOURCES_POOL_WORKERS;
use crate::thread_pool::pool::{default_worker_count, Pool};

/// Name of the pool used for background resource loading.
pub const RESOURCES_POOL: &str = "resources";

lazy_static! {
    static ref REGISTRY: PoolRegistry = PoolRegistry::new();
}

/// Holder of the engine's long-lived pools, reachable from anywhere.
///
/// Constructed at most once on first access and never torn down; its
/// pools live until process exit.
pub struct PoolRegistry {
    resources: Pool,
}

impl PoolRegistry {
    fn new() -> Self {
        let workers = RESOURCES_POOL_WORKERS.min(default_worker_count());
        Self {
            resources: Pool::named(RESOURCES_POOL, workers),
        }
    }

    /// Returns the process-wide registry, constructing it on first
    /// access.
    pub fn global() -> &'static PoolRegistry {
        &REGISTRY
    }

    /// The shared pool for loading resources off the main thread.
    pub fn resources_pool(&self) -> &Pool {
        &self.resources
    }

    /// Looks up a pool by name.
    ///
    /// Pool names are a convention between subsystems, not a schema the
    /// registry validates; an unknown name is a caller error that gets
    /// logged, not a fatal one.
    pub fn pool(&self, name: &str) -> Option<&Pool> {
        match name {
            RESOURCES_POOL => Some(&self.resources),
            other => {
                log::warn!("requested unknown pool '{}'", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_singleton_identity_across_threads() {
        let counter = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    let pool = PoolRegistry::global().resources_pool();
                    let counter = Arc::clone(&counter);
                    pool.submit(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    })
                    .wait()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("submitter panicked"), Ok(()));
        }

        // Both threads reached the same pool instance.
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(std::ptr::eq(
            PoolRegistry::global().resources_pool(),
            PoolRegistry::global().resources_pool(),
        ));
    }

    #[test]
    fn test_resources_pool_sizing() {
        let pool = PoolRegistry::global().resources_pool();
        assert_eq!(pool.name(), RESOURCES_POOL);
        assert!(pool.worker_count() >= 1);
        assert!(pool.worker_count() <= RESOURCES_POOL_WORKERS);
    }

    #[test]
    fn test_unknown_pool_is_none() {
        let registry = PoolRegistry::global();
        assert!(registry.pool(RESOURCES_POOL).is_some());
        assert!(registry.pool("physics").is_none());
    }
}
