//! Comparative benchmark harness for bilateral-grid filter
//! implementations.
//!
//! The harness loads an input image, runs every enabled candidate
//! implementation of the same bilateral-grid transform over identical
//! input, times each one under a shared warm-up / minimum-of-trials
//! protocol, and persists one output artifact for inspection.
//!
//! The built-in candidates compute the same transform (the test suite
//! holds them to agreement within 1e-4) and differ only in execution
//! strategy:
//!
//! - [`ManualFilter`] — manually tuned flat-buffer implementation
//! - [`ScalarFilter`] — straightforward reference loops
//! - [`ParallelFilter`] — rayon data-parallel execution
//!
//! # Example
//!
//! ```
//! use bilateral_grid::{harness, HarnessOptions, ImageF32};
//!
//! let input = ImageF32::from_raw(16, 16, 1, vec![0.5; 256]).unwrap();
//! let report = harness::run(&input, &HarnessOptions::new(0.1, 2)).unwrap();
//! for result in &report.results {
//!     println!("{} time: {:.3}ms", result.label, result.millis());
//! }
//! ```

pub mod bench;
mod buffer;
pub mod candidate;
mod error;
pub mod grid;
pub mod harness;
pub mod io;
mod params;

pub use bench::{measure, BenchmarkOptions};
pub use buffer::ImageF32;
pub use candidate::{Candidate, Registry};
pub use error::Error;
pub use grid::{ManualFilter, ParallelFilter, ScalarFilter};
pub use harness::{BenchmarkResult, HarnessOptions, HarnessReport};
pub use params::FilterParams;
