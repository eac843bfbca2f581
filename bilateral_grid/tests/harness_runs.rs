//! End-to-end harness runs through the orchestrator and codec I/O.

use std::time::Duration;

use bilateral_grid::harness::{self, HarnessOptions};
use bilateral_grid::{io, Candidate, Error, FilterParams, ImageF32, ManualFilter};

/// Options trimmed for test speed: tiny trial floor, two trials.
fn fast_opts(range_sigma: f32) -> HarnessOptions {
    let mut opts = HarnessOptions::new(range_sigma, 2);
    opts.bench.min_trial_time = Duration::from_micros(200);
    opts.bench.warmup_iterations = 1;
    opts
}

fn gradient_image(width: usize, height: usize) -> ImageF32 {
    let data: Vec<f32> = (0..width * height)
        .map(|i| ((i % width) + (i / width)) as f32 / (width + height) as f32)
        .collect();
    ImageF32::from_raw(width, height, 1, data).unwrap()
}

#[test]
fn report_follows_registry_order() {
    let input = gradient_image(32, 32);
    let report = harness::run(&input, &fast_opts(0.1)).unwrap();
    let names: Vec<_> = report.results.iter().map(|r| r.name).collect();
    assert_eq!(names, ["manual", "scalar", "parallel"]);
    for result in &report.results {
        assert!(result.seconds > 0.0, "{} reported zero latency", result.name);
        assert!(result.millis() > 0.0);
    }
}

#[test]
fn enabled_subset_is_respected() {
    let input = gradient_image(24, 24);
    let mut opts = fast_opts(0.1);
    opts.enabled = Some(vec!["parallel".into(), "scalar".into()]);
    let report = harness::run(&input, &opts).unwrap();
    let names: Vec<_> = report.results.iter().map(|r| r.name).collect();
    assert_eq!(names, ["scalar", "parallel"]);
}

#[test]
fn unknown_candidate_is_rejected() {
    let input = gradient_image(16, 16);
    let mut opts = fast_opts(0.1);
    opts.enabled = Some(vec!["scalar".into(), "warp".into()]);
    let err = harness::run(&input, &opts).unwrap_err();
    assert!(matches!(err, Error::UnknownCandidate(name) if name == "warp"));
}

#[test]
fn artifact_is_the_primary_candidates_output() {
    // Registry order must not leak into the persisted artifact: the
    // harness re-runs the primary after timing.
    let input = gradient_image(40, 28);
    let report = harness::run(&input, &fast_opts(0.1)).unwrap();

    let mut expected = ImageF32::new(40, 28, 1);
    ManualFilter
        .run(&input, &FilterParams::new(0.1), &mut expected)
        .unwrap();
    assert_eq!(report.output, expected);
}

#[test]
fn invalid_sigma_fails_before_any_timing() {
    let input = gradient_image(16, 16);
    let err = harness::run(&input, &fast_opts(-0.1)).unwrap_err();
    assert!(matches!(err, Error::InvalidRangeSigma(_)));
}

#[test]
fn end_to_end_roundtrip_on_constant_image() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.png");
    let output_path = dir.path().join("output.png");

    let constant = ImageF32::from_raw(4, 4, 1, vec![0.5; 16]).unwrap();
    io::save(&constant, &input_path).unwrap();

    let results = harness::run_files(&input_path, &output_path, &fast_opts(0.1)).unwrap();
    assert_eq!(results.len(), 3);

    // A constant image is invariant under bilateral smoothing, so the
    // artifact re-encodes to the same gray levels as the input.
    let input = io::load(&input_path).unwrap();
    let output = io::load(&output_path).unwrap();
    assert_eq!(output.shape(), input.shape());
    for (a, b) in output.as_slice().iter().zip(input.as_slice()) {
        assert!((a - b).abs() < 0.5 / 255.0, "{a} vs {b}");
    }
}

#[test]
fn missing_input_reports_load_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("never_written.png");
    let err = harness::run_files(
        &dir.path().join("missing.png"),
        &output_path,
        &fast_opts(0.1),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Load { .. }));
    assert!(!output_path.exists(), "artifact written despite the failure");
}
