//! Wall-clock benchmark runner.
//!
//! [`measure`] runs a callable under a warm-up / repeated-trial protocol and
//! reports the minimum observed latency. The minimum approximates best-case
//! steady-state cost and is far less sensitive to scheduler and OS noise
//! than the mean or median, and it can only decrease as more trials are
//! added.

use std::time::{Duration, Instant};

use log::debug;

/// Iteration and trial-length parameters for one measurement.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkOptions {
    /// Number of timed trials. The reported latency is the minimum across
    /// them, so raising this never increases the result.
    pub min_iterations: u32,
    /// Lower bound on the wall-clock length of one trial. Callables that
    /// finish faster than this are batched until a trial is long enough to
    /// resolve above timer granularity.
    pub min_trial_time: Duration,
    /// Untimed calls made before the first trial so the callable reaches
    /// steady state (allocator, caches, device queues). Their results are
    /// discarded.
    pub warmup_iterations: u32,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            min_iterations: 10,
            min_trial_time: Duration::from_millis(10),
            warmup_iterations: 3,
        }
    }
}

/// Measure the steady-state latency of `op` in seconds.
///
/// Each trial times `batch` consecutive invocations with [`Instant`] and
/// records `elapsed / batch` as one sample; the batch size is chosen once,
/// from an untimed probe call, so that a trial spans at least
/// [`min_trial_time`][BenchmarkOptions::min_trial_time]. The harness's own
/// loop overhead is outside the timed region.
///
/// The first `Err` returned by `op` aborts the measurement and propagates
/// unmodified, whether it happens during warm-up or a trial. A failing
/// candidate is never silently skipped.
pub fn measure<E, F>(opts: &BenchmarkOptions, mut op: F) -> Result<f64, E>
where
    F: FnMut() -> Result<(), E>,
{
    for _ in 0..opts.warmup_iterations {
        op()?;
    }

    // One extra untimed call estimates the single-invocation cost and
    // sizes the inner batch.
    let probe = Instant::now();
    op()?;
    let estimate = probe.elapsed();
    let batch = if estimate >= opts.min_trial_time {
        1
    } else {
        let single = estimate.as_secs_f64().max(1e-9);
        (opts.min_trial_time.as_secs_f64() / single).ceil() as u32
    };
    debug!("inner batch of {batch} (single call ~{estimate:?})");

    let mut best = f64::INFINITY;
    for _ in 0..opts.min_iterations.max(1) {
        let start = Instant::now();
        for _ in 0..batch {
            op()?;
        }
        let sample = start.elapsed().as_secs_f64() / f64::from(batch);
        best = best.min(sample);
    }
    Ok(best)
}
