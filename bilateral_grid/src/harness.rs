//! Harness orchestration.
//!
//! Wires codec I/O, the candidate registry and the benchmark runner
//! together: one shared input, one reusable output buffer, every enabled
//! candidate timed in registry order, one artifact persisted at the end.

use std::path::Path;

use log::debug;

use crate::bench::{measure, BenchmarkOptions};
use crate::buffer::ImageF32;
use crate::candidate::Registry;
use crate::error::Error;
use crate::io;
use crate::params::FilterParams;

/// Configuration for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    /// Range smoothing strength handed to every candidate.
    pub range_sigma: f32,
    /// Candidate names to benchmark; `None` enables all of them.
    pub enabled: Option<Vec<String>>,
    /// Timing protocol parameters.
    pub bench: BenchmarkOptions,
}

impl HarnessOptions {
    /// Options with the default protocol and `timing_iterations` timed
    /// trials per candidate.
    #[must_use]
    pub fn new(range_sigma: f32, timing_iterations: u32) -> Self {
        Self {
            range_sigma,
            enabled: None,
            bench: BenchmarkOptions {
                min_iterations: timing_iterations,
                ..BenchmarkOptions::default()
            },
        }
    }
}

/// Best observed latency for one candidate.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Registry key of the candidate.
    pub name: &'static str,
    /// Report label of the candidate.
    pub label: &'static str,
    /// Minimum latency across trials, in seconds.
    pub seconds: f64,
}

impl BenchmarkResult {
    /// Latency in milliseconds.
    #[must_use]
    pub fn millis(&self) -> f64 {
        self.seconds * 1e3
    }
}

/// Everything one run produces: latencies in registry order plus the
/// output artifact.
#[derive(Debug)]
pub struct HarnessReport {
    pub results: Vec<BenchmarkResult>,
    pub output: ImageF32,
}

/// Benchmark every enabled candidate against `input`.
///
/// Candidates run strictly sequentially over one shared output buffer;
/// concurrent invocation would add contention noise to the measurement and
/// race on the buffer. The input snapshot taken before timing is compared
/// bit-for-bit after each candidate, so a candidate that writes into the
/// shared input aborts the run instead of corrupting its successors.
///
/// The returned artifact is always the primary candidate's output: the
/// buffer holds whichever candidate ran last after timing, so the primary
/// is re-run once, untimed, before the report is assembled.
pub fn run(input: &ImageF32, opts: &HarnessOptions) -> Result<HarnessReport, Error> {
    let registry = match &opts.enabled {
        Some(names) => Registry::with_enabled(names)?,
        None => Registry::all(),
    };
    let params = FilterParams::new(opts.range_sigma);
    let mut output = ImageF32::new(input.width(), input.height(), 1);

    let snapshot: Vec<u32> = input.as_slice().iter().map(|s| s.to_bits()).collect();

    // Untimed reference pass: fail fast on malformed input or parameters
    // before any trial time is spent.
    let primary = registry.primary();
    primary.run(input, &params, &mut output)?;

    let mut results = Vec::with_capacity(registry.len());
    for candidate in registry.iter() {
        let seconds = measure(&opts.bench, || candidate.run(input, &params, &mut output))?;
        debug!(
            "{}: best of {} trials = {seconds:.6}s",
            candidate.name(),
            opts.bench.min_iterations
        );
        let intact = input
            .as_slice()
            .iter()
            .map(|s| s.to_bits())
            .eq(snapshot.iter().copied());
        if !intact {
            return Err(Error::InputMutated {
                candidate: candidate.name(),
            });
        }
        results.push(BenchmarkResult {
            name: candidate.name(),
            label: candidate.label(),
            seconds,
        });
    }

    primary.run(input, &params, &mut output)?;

    Ok(HarnessReport { results, output })
}

/// Load `input_path`, benchmark, and persist the artifact at `output_path`.
///
/// Nothing is written when any stage fails; benchmarking is an offline,
/// operator-driven task, so there is no retry and no partial-results mode.
pub fn run_files(
    input_path: &Path,
    output_path: &Path,
    opts: &HarnessOptions,
) -> Result<Vec<BenchmarkResult>, Error> {
    let input = io::load(input_path)?;
    debug!(
        "loaded {} ({}x{})",
        input_path.display(),
        input.width(),
        input.height()
    );
    let report = run(&input, opts)?;
    io::save(&report.output, output_path)?;
    Ok(report.results)
}
