//! Bilateral-grid filter variants.
//!
//! All variants compute the same transform and are interchangeable behind
//! the [`Candidate`][crate::Candidate] trait: pixels scatter homogeneous
//! `(value, weight)` pairs into a coarse spatial/range grid, the grid is
//! blurred with a 5-tap kernel along each axis, and the output is sliced
//! back out by trilinear interpolation and normalization. They differ only
//! in execution strategy, and the test suite holds them to numerical
//! agreement.

mod manual;
mod parallel;
mod scalar;

pub use manual::ManualFilter;
pub use parallel::ParallelFilter;
pub use scalar::ScalarFilter;

use crate::buffer::ImageF32;
use crate::error::Error;
use crate::params::FilterParams;

/// Spatial cell size of the grid, in pixels.
pub(crate) const CELL: usize = 8;

/// Blur kernel applied along each grid axis. Unnormalized; the final
/// division by the interpolated weight cancels the scale.
pub(crate) const KERNEL: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];

/// Grid extents for a given image size and range sigma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridDims {
    pub gw: usize,
    pub gh: usize,
    pub gd: usize,
}

/// Extents sized so that both the scatter (rounded cell index) and the
/// slice (floor index plus one) stay in bounds.
pub(crate) fn grid_dims(width: usize, height: usize, range_sigma: f32) -> GridDims {
    GridDims {
        gw: (width - 1) / CELL + 2,
        gh: (height - 1) / CELL + 2,
        gd: (1.0 / range_sigma).floor() as usize + 2,
    }
}

/// Validate parameters and buffer shapes before touching any pixels.
///
/// Returns the sigma so callers work with the checked value.
pub(crate) fn check_contract(
    input: &ImageF32,
    params: &FilterParams,
    output: &ImageF32,
) -> Result<f32, Error> {
    let r = params.range_sigma;
    if !r.is_finite() || r <= 0.0 {
        return Err(Error::InvalidRangeSigma(r));
    }
    if input.width() == 0 || input.height() == 0 {
        return Err(Error::EmptyInput);
    }
    let expected = (input.width(), input.height(), 1);
    if output.shape() != expected {
        return Err(Error::ShapeMismatch {
            expected,
            actual: output.shape(),
        });
    }
    Ok(r)
}
