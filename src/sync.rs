use std::sync::PoisonError;

#[cfg(feature = "loom")]
mod imp {
    use crate::config::TraversalConfig;
    pub(crate) use loom::{
        sync::{Condvar, Mutex, MutexGuard},
        thread,
    };
    use rayon::ThreadPoolBuildError;
    pub(crate) use std::sync::Arc;

    /// Runs `op(unit)` once per execution unit, each on its own loom thread.
    pub(crate) fn broadcast<R: Send + 'static>(
        config: &TraversalConfig,
        op: impl Fn(usize) -> R + Send + Sync + 'static,
    ) -> Result<Vec<R>, ThreadPoolBuildError> {
        let units = config.units().get();
        if units == 1 {
            return Ok(vec![op(0)]);
        }
        let op = Arc::new(op);
        let handles: Vec<_> = (0..units)
            .map(|unit| {
                let op = Arc::clone(&op);
                thread::spawn(move || op(unit))
            })
            .collect();
        Ok(handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect())
    }
}

#[cfg(not(feature = "loom"))]
mod imp {
    use crate::config::TraversalConfig;
    use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
    pub(crate) use std::sync::{Arc, Condvar, Mutex, MutexGuard};

    /// Runs `op(unit)` once per execution unit.
    ///
    /// A single unit runs inline on the calling thread. Otherwise a dedicated
    /// pool with exactly one thread per unit is built, and every thread runs
    /// one long-lived unit. Panics are propagated after all units return.
    pub(crate) fn broadcast<R: Send>(
        config: &TraversalConfig,
        op: impl Fn(usize) -> R + Send + Sync,
    ) -> Result<Vec<R>, ThreadPoolBuildError> {
        let units = config.units().get();
        if units == 1 {
            return Ok(vec![op(0)]);
        }
        let names = config.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(units)
            .thread_name(move |unit| names.thread_name(unit))
            .build()?;
        Ok(pool.broadcast(|ctx| op(ctx.index())))
    }
}

pub(crate) use imp::*;

/// Locks `mutex`, ignoring poisoning.
///
/// Vertex work never runs while the lock is held, so a panicking unit cannot
/// leave the guarded state half-updated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Blocks on `condvar` until notified, ignoring poisoning.
pub(crate) fn wait<'a, T>(condvar: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
}
