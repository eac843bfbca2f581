//! Side-by-side comparison of the bilateral-grid candidates.
//!
//! Run with: cargo run --release --example compare_candidates

use bilateral_grid::bench::{measure, BenchmarkOptions};
use bilateral_grid::{
    Candidate, FilterParams, ImageF32, ManualFilter, ParallelFilter, ScalarFilter,
};

fn gradient_image(width: usize, height: usize) -> ImageF32 {
    let data: Vec<f32> = (0..width * height)
        .map(|i| {
            let x = (i % width) as f32 / width as f32;
            let y = (i / width) as f32 / height as f32;
            (x + y) / 2.0
        })
        .collect();
    ImageF32::from_raw(width, height, 1, data).unwrap()
}

fn main() {
    println!("Bilateral-grid candidate comparison");
    println!("===================================\n");

    let sizes = [(256, 256), (512, 512), (1024, 1024)];
    let params = FilterParams::new(0.1);
    let opts = BenchmarkOptions::default();

    for (width, height) in sizes {
        println!("Image size: {width}x{height}");
        println!("{:-<60}", "");

        let input = gradient_image(width, height);
        let mut output = ImageF32::new(width, height, 1);
        let candidates: [&dyn Candidate; 3] = [&ManualFilter, &ScalarFilter, &ParallelFilter];

        let mut results = Vec::new();
        let mut outputs = Vec::new();
        for candidate in candidates {
            let seconds =
                measure(&opts, || candidate.run(&input, &params, &mut output)).unwrap();
            results.push((candidate.label(), seconds));
            outputs.push(output.clone());
        }

        let baseline = results[0].1;
        for (label, seconds) in &results {
            println!(
                "  {:<20} time={:.2}ms  speedup={:.2}x",
                label,
                seconds * 1e3,
                baseline / seconds
            );
        }

        // Verify the variants still agree
        let max_diff = outputs[1..]
            .iter()
            .flat_map(|o| {
                o.as_slice()
                    .iter()
                    .zip(outputs[0].as_slice())
                    .map(|(a, b)| (a - b).abs())
            })
            .fold(0.0f32, f32::max);
        println!("  max candidate difference: {max_diff:.6}\n");
    }
}
