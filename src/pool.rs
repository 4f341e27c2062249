//! Fixed-size worker pools.
//!
//! Every parallel operation runs inside its own rayon pool sized to the
//! caller's worker count, so concurrency never exceeds what was asked for.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// Host-reported parallelism.
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}

/// `0` means "use the host default".
#[inline]
pub fn resolve_workers(workers: usize) -> usize {
    if workers == 0 {
        default_workers()
    } else {
        workers
    }
}

pub fn build(workers: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(resolve_workers(workers))
        .thread_name(|i| format!("holdem-worker-{i}"))
        .build()?;
    Ok(pool)
}

/// Split `total` into `workers` shares; the first `total % workers` shares
/// get one extra so the sum is exact.
pub fn split_evenly(total: u64, workers: usize) -> Vec<u64> {
    let workers = workers.max(1) as u64;
    let base = total / workers;
    let extra = total % workers;
    (0..workers).map(|w| base + u64::from(w < extra)).collect()
}
