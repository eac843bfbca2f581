use std::path::PathBuf;

use anyhow::Context;
use bilateral_grid::harness::{self, HarnessOptions};
use clap::Parser;

const USAGE: &str = "Usage: bilateral-grid input.png output.png range_sigma timing_iterations\n\
e.g. bilateral-grid input.png output.png 0.1 10\n";

/// Benchmark interchangeable bilateral-grid filter implementations against
/// one shared input image.
#[derive(Debug, Parser)]
#[command(name = "bilateral-grid", version)]
struct Args {
    /// Input image (PNG or JPEG).
    input: Option<PathBuf>,
    /// Destination for the filtered artifact.
    output: Option<PathBuf>,
    /// Range smoothing strength, e.g. 0.1.
    range_sigma: Option<f32>,
    /// Timed trials per candidate.
    timing_iterations: Option<u32>,
    /// Comma-separated candidate names to benchmark (default: all).
    #[arg(long, value_delimiter = ',')]
    candidates: Option<Vec<String>>,
}

impl Args {
    /// All four positionals, or `None` when the invocation is a help
    /// request rather than a run.
    fn positionals(&self) -> Option<(&PathBuf, &PathBuf, f32, u32)> {
        Some((
            self.input.as_ref()?,
            self.output.as_ref()?,
            self.range_sigma?,
            self.timing_iterations?,
        ))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let Some((input, output, range_sigma, timing_iterations)) = args.positionals() else {
        print!("{USAGE}");
        return Ok(());
    };

    let mut opts = HarnessOptions::new(range_sigma, timing_iterations);
    opts.enabled = args.candidates.clone();

    let results = harness::run_files(input, output, &opts)
        .with_context(|| format!("benchmarking {}", input.display()))?;
    for result in &results {
        println!("{} time: {:.3}ms", result.label, result.millis());
    }
    Ok(())
}
